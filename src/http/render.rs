//! Minimal HTML pages.
//!
//! Plain markup only; every value that came from the node or the user is
//! escaped before it is written out.

use std::fmt::Write;

use chrono::DateTime;
use serde_json::Value;

use crate::explorer::IndexView;

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Unix seconds as `YYYY-MM-DD HH:MM:SS UTC`.
pub fn format_time(value: &Value) -> String {
    value
        .as_i64()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Escaped display form of `value[key]`.
fn field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => escape_html(s),
        None | Some(Value::Null) => "-".to_string(),
        Some(other) => escape_html(&other.to_string()),
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n\
         <form action=\"/search\" method=\"get\">\
         <input name=\"q\" placeholder=\"height, block hash or txid\">\
         <button type=\"submit\">Search</button></form>\n\
         {}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

pub fn index_page(view: &IndexView) -> String {
    let info = &view.summary;
    let mut body = String::new();

    let _ = write!(
        body,
        "<h1>Block Explorer</h1>\n<dl>\
         <dt>Block height</dt><dd>{}</dd>\
         <dt>Difficulty</dt><dd>{}</dd>\
         <dt>Connections</dt><dd>{}</dd>\
         <dt>Network</dt><dd>{}</dd></dl>\n",
        field(info, "blocks"),
        field(info, "difficulty"),
        field(info, "connections"),
        field(info, "chain"),
    );

    body.push_str(
        "<h2>Recent blocks</h2>\n<table>\n\
         <tr><th>Height</th><th>Hash</th><th>Time</th><th>Transactions</th></tr>\n",
    );
    for block in &view.blocks {
        let hash = field(block, "hash");
        let _ = writeln!(
            body,
            "<tr><td><a href=\"/block/{hash}\">#{}</a></td><td>{hash}</td><td>{}</td><td>{}</td></tr>",
            field(block, "height"),
            format_time(&block["time"]),
            field(block, "nTx"),
        );
    }
    body.push_str("</table>");

    page("Block Explorer", &body)
}

pub fn block_page(block: &Value) -> String {
    let mut body = String::new();
    let height = field(block, "height");

    let _ = writeln!(body, "<h1>Block #{height}</h1>\n<dl>");
    let rows = [
        ("Hash", field(block, "hash")),
        ("Height", height.clone()),
        ("Timestamp", format_time(&block["time"])),
        ("Difficulty", field(block, "difficulty")),
        ("Nonce", field(block, "nonce")),
        ("Version", format!("0x{}", field(block, "versionHex"))),
        ("Merkle root", field(block, "merkleroot")),
        ("Transactions", field(block, "nTx")),
        ("Size", format!("{} bytes", field(block, "size"))),
        ("Weight", field(block, "weight")),
    ];
    for (label, value) in rows {
        let _ = writeln!(body, "<dt>{label}</dt><dd>{value}</dd>");
    }
    body.push_str("</dl>\n<nav>");

    if let Some(prev) = block.get("previousblockhash").and_then(Value::as_str) {
        let _ = write!(body, "<a href=\"/block/{0}\">&lt;&lt; Previous block</a> ", escape_html(prev));
    }
    if let Some(next) = block.get("nextblockhash").and_then(Value::as_str) {
        let _ = write!(body, "<a href=\"/block/{0}\">Next block &gt;&gt;</a>", escape_html(next));
    }
    body.push_str("</nav>\n<h2>Transactions</h2>\n<table>\n");

    if let Some(txids) = block.get("tx").and_then(Value::as_array) {
        for txid in txids {
            let shown = txid
                .as_str()
                .map(escape_html)
                .unwrap_or_else(|| escape_html(&txid.to_string()));
            let _ = writeln!(body, "<tr><td>{shown}</td></tr>");
        }
    }
    body.push_str("</table>");

    page(&format!("Block #{height}"), &body)
}

pub fn not_found_page(query: &str) -> String {
    let body = format!(
        "<h1>Not found</h1>\n<p>Nothing in the chain matches this query.</p>\n\
         <p>Query: {}</p>\n<a href=\"/\">Back to index</a>",
        escape_html(query)
    );
    page("Not found", &body)
}

pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>System error</h1>\n<p>SYSTEM ERROR: {}</p>\n<a href=\"/\">Back to index</a>",
        escape_html(message)
    );
    page("System error", &body)
}
