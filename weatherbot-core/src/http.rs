use reqwest::{RequestBuilder, StatusCode};

use crate::error::UpstreamError;

/// Send `request` and read the whole body; status handling is left to the caller.
pub(crate) async fn fetch_body(
    service: &'static str,
    request: RequestBuilder,
) -> Result<(StatusCode, String), UpstreamError> {
    let transport = |source| UpstreamError::Transport { service, source };

    let res = request.send().await.map_err(transport)?;
    let status = res.status();
    let body = res.text().await.map_err(transport)?;

    Ok((status, body))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
