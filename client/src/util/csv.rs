//! CSV export for admin tables.
//!
//! Rows are built in memory and handed to the browser as a synthetic
//! anchor-click download. Fields are quoted per RFC 4180 when needed.

#[cfg(test)]
#[path = "csv_test.rs"]
mod csv_test;

use crate::net::types::Payment;
use crate::util::format::format_optional_date;

/// Quote a field when it contains a delimiter, quote, or line break.
#[must_use]
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

/// Header line plus one line per row, `\r\n` separated.
#[must_use]
pub fn to_csv<R: AsRef<[String]>>(headers: &[&str], rows: &[R]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.iter().map(|h| escape_field(h)).collect::<Vec<_>>().join(","));
    for row in rows {
        lines.push(row.as_ref().iter().map(|f| escape_field(f)).collect::<Vec<_>>().join(","));
    }
    lines.join("\r\n")
}

/// Payment table export used by the admin console.
#[must_use]
pub fn payments_csv(payments: &[Payment]) -> String {
    let headers = ["Payment ID", "Date", "Phone", "Amount (KES)", "Status", "M-Pesa Receipt", "Description"];
    let rows: Vec<Vec<String>> = payments
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                format_optional_date(p.created_at.as_ref()),
                p.phone_number.clone(),
                format!("{:.2}", p.amount),
                p.status.as_str().to_owned(),
                p.mpesa_receipt_number.clone().unwrap_or_default(),
                p.description.clone(),
            ]
        })
        .collect();
    to_csv(&headers, &rows)
}

/// Offer `content` to the user as a downloaded file.
pub fn download_csv(file_name: &str, content: &str) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(content));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("text/csv;charset=utf-8");
        let Ok(blob) = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options) else {
            return;
        };
        let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
            return;
        };
        if let Ok(anchor) = document
            .create_element("a")
            .and_then(|el| el.dyn_into::<web_sys::HtmlAnchorElement>().map_err(Into::into))
        {
            anchor.set_href(&url);
            anchor.set_download(file_name);
            anchor.click();
        }
        let _ = web_sys::Url::revoke_object_url(&url);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (file_name, content);
    }
}
