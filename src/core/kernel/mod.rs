//! Transport kernel - exchange-agnostic request pipeline
//!
//! The kernel contains the pieces every REST call goes through, in order:
//!
//! ## Encoding
//! - `RequestParams`: capability of a request model to validate and encode itself
//! - `ParamSet`: ordered, duplicate-free query parameters
//!
//! ## Authentication
//! - `Signer`: API key header plus signature over the query string
//! - `HmacSigner`: HMAC-SHA256, lowercase hex
//!
//! ## Transport
//! - `RestRequest`: fully built request descriptor
//! - `RestClient`: injected HTTP transport, `ReqwestRest` by default
//!
//! ## Decoding
//! - `decode_response`: the one status check and JSON decode shared by all endpoints
//!
//! ## Time
//! - `Clock`: timestamp source, `SystemClock` by default

pub mod clock;
pub mod codec;
pub mod response;
pub mod rest;
pub mod signer;

pub use clock::{Clock, SystemClock};
pub use codec::{ParamSet, RequestParams};
pub use response::{decode_response, ApiErrorBody};
pub use rest::{
    EndpointSecurity, RawResponse, ReqwestRest, RestClient, RestClientBuilder, RestClientConfig,
    RestRequest, API_KEY_HEADER,
};
pub use signer::{HmacSigner, Signer};
