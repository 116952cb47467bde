//! JSON body extractor that fails with [`ApiError`].
//!
//! Malformed bodies, wrong content types and unknown fields all surface as a
//! 400 in the common failure shape instead of axum's plain-text rejection.

use axum::extract::FromRequest;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
