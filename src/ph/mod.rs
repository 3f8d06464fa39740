mod client;
pub mod http;
mod types;

pub use client::PhClient;
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use types::{Post, PostUser, PostsResponse};
