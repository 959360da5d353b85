#![allow(missing_docs)]

pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod server;

pub(crate) use html::{
    assert_valid_html, has_class, must_select, parse_html_document, parse_html_fragment,
    parse_markup, select_all,
};
pub(crate) use http::{assert_content_type, assert_status_ok};
pub(crate) use server::{spawn_test_server, unused_local_url};
