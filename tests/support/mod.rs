//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod socket_guard;

/// One result block as the search endpoint renders it.
pub fn result_block(title: &str, citation: &str, pdf_link: Option<&str>) -> String {
    let sources = pdf_link.map_or_else(String::new, |href| {
        format!(
            r#"<div class="gs_ggs gs_fl"><div class="gs_ggsd"><div class="gs_or_ggsm"><a href="{href}"><span class="gs_ctg2">[PDF]</span> host</a></div></div></div>"#
        )
    });
    format!(
        r#"<div class="gs_r gs_or gs_scl" data-cid="x">{sources}<div class="gs_ri"><h3 class="gs_rt"><span class="gs_ct1">[PDF]</span> <a href="https://host/landing">{title}</a></h3><div class="gs_a">{citation}</div></div></div>"#
    )
}

/// A full results page wrapping `blocks`.
pub fn results_page(blocks: &[String]) -> String {
    format!(
        "<!doctype html><html><body><div id=\"gs_res_ccl_mid\">{}</div></body></html>",
        blocks.concat()
    )
}
