use axum::response::Html;
use pulldown_cmark::{html, Parser};

const API_DOCS: &str = include_str!("../docs/api-documentation.md");

/// GET / — API documentation rendered from the bundled markdown file.
pub async fn docs_handler() -> Html<String> {
    Html(render_docs())
}

fn render_docs() -> String {
    let mut body = String::new();
    html::push_html(&mut body, Parser::new(API_DOCS));

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Numbers Fact API</title>\n</head>\n<body>\n{body}</body>\n</html>"
    )
}
