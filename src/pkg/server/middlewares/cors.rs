use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::prelude::{Error, Result};

/// Open policy for the public listing and application intake.
pub fn public() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Admin routes only answer cross-origin requests from `origins`, with
/// credentials. An empty list disables cross-origin admin access entirely.
pub fn admin(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| HeaderValue::from_str(o.trim()).map_err(|_| Error::InvalidOrigin(o.clone())))
        .collect::<Result<Vec<_>>>()?;
    tracing::info!("admin CORS origins: {:?}", origins);
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparsable_origin() {
        let err = admin(&["https://ok.example.com".into(), "bad\norigin".into()]).unwrap_err();
        assert!(matches!(err, Error::InvalidOrigin(o) if o == "bad\norigin"));
    }
}
