use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;
use http::Method;
use lazy_static::lazy_static;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::blocking::{Client, Response};
use url::Url;

use davmount_store::{RemoteStore, ResourceAttr, StoreError};

use crate::error::Error;
use crate::multistatus;

lazy_static! {
    static ref PROPFIND: Method = Method::from_bytes(b"PROPFIND").expect("static method token");
    static ref MOVE: Method = Method::from_bytes(b"MOVE").expect("static method token");
}

/// Characters escaped in outgoing path segments. `/` stays literal so a
/// whole path can be encoded in one pass.
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%');

/// A remote store backed by a WebDAV server.
///
/// One configured, authenticated client is built up front and injected
/// into the adapter for its whole lifetime. Every contract operation is a
/// fresh round trip; nothing is cached between calls.
///
/// The store path IS the remote key: it is percent-encoded onto the base
/// URL on the way out and hrefs are decoded on the way back in, with no
/// translation table in between.
pub struct DavClient {
    client: Client,
    base_url: Url,
    default_headers: HashMap<String, String>,
}

impl DavClient {
    /// Create a client for the share at `base_url`.
    ///
    /// The base URL is normalized to a trailing slash so joined paths stay
    /// under the share root.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client with a custom reqwest client (timeouts, proxies,
    /// TLS settings).
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, Error> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            default_headers: HashMap::new(),
        })
    }

    /// Add a default header sent with every request.
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Install a basic-auth Authorization header.
    pub fn with_basic_auth(self, username: &str, password: &str) -> Self {
        let token = BASE64.encode(format!("{}:{}", username, password));
        self.with_default_header("Authorization", format!("Basic {}", token))
    }

    /// Build the full URL for a store path.
    fn url_for(&self, path: &str) -> Result<Url, Error> {
        let relative = path.trim_start_matches('/');
        let encoded = utf8_percent_encode(relative, PATH_ESCAPE).to_string();
        self.base_url.join(&encoded).map_err(Error::from)
    }

    /// Execute one request with default headers plus `headers`.
    fn request(
        &self,
        method: Method,
        path: &str,
        headers: &[(&str, &str)],
    ) -> Result<Response, Error> {
        let url = self.url_for(path)?;
        log::debug!("{} {}", method, url);

        let mut builder = self.client.request(method, url);
        for (name, value) in &self.default_headers {
            builder = builder.header(name, value);
        }
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        Ok(builder.send()?)
    }

    fn propfind(&self, path: &str, depth: &str) -> Result<Response, StoreError> {
        let response = self
            .request(PROPFIND.clone(), path, &[("Depth", depth)])
            .map_err(StoreError::from)?;
        match response.status().as_u16() {
            207 => Ok(response),
            404 => Err(StoreError::NotFound {
                path: path.to_string(),
            }),
            status => Err(StoreError::UnexpectedStatus {
                verb: "PROPFIND",
                path: path.to_string(),
                status,
            }),
        }
    }

    /// Turn a listing href into a child name relative to the request path.
    ///
    /// Mirrors the server's view: the request path prefix is cut off by
    /// length, the empty remainder (the collection itself) is dropped,
    /// one trailing slash marking a collection is trimmed, and the rest is
    /// percent-decoded.
    fn child_name(&self, request_path: &str, href: &str) -> Result<Option<String>, Error> {
        // Some servers return absolute URLs in hrefs.
        let href_path = if href.starts_with("http://") || href.starts_with("https://") {
            Url::parse(href)?.path().to_string()
        } else {
            href.to_string()
        };

        let Some(rest) = href_path.get(request_path.len()..) else {
            return Ok(None);
        };
        let name = rest.trim_start_matches('/').trim_end_matches('/');
        if name.is_empty() {
            return Ok(None);
        }

        let decoded = percent_decode_str(name)
            .decode_utf8()
            .map_err(|e| Error::InvalidHref {
                message: format!("{}: {}", href, e),
            })?;
        Ok(Some(decoded.into_owned()))
    }
}

impl RemoteStore for DavClient {
    fn stat(&self, path: &str) -> Result<ResourceAttr, StoreError> {
        let response = self.propfind(path, "0")?;
        let body = response.text().map_err(StoreError::transport)?;
        Ok(multistatus::parse_attr(&body)?)
    }

    fn read(&self, path: &str, start: u64, end: u64) -> Result<Bytes, StoreError> {
        // Size is fetched fresh so the Range never runs past the resource.
        let attr = self.stat(path)?;
        if start >= attr.size || start >= end {
            return Ok(Bytes::new());
        }
        let last = end.min(attr.size) - 1;
        let range = format!("bytes={}-{}", start, last);

        let response = self
            .request(Method::GET, path, &[("Range", &range)])
            .map_err(StoreError::from)?;
        match response.status().as_u16() {
            206 => response.bytes().map_err(StoreError::transport),
            status => Err(StoreError::UnexpectedStatus {
                verb: "GET",
                path: path.to_string(),
                status,
            }),
        }
    }

    fn list_files(&self, path: &str) -> Result<Vec<String>, StoreError> {
        let request_path = self.url_for(path).map_err(StoreError::from)?.path().to_string();
        let response = self.propfind(path, "1")?;
        let body = response.text().map_err(StoreError::transport)?;

        let hrefs = multistatus::parse_hrefs(&body)?;
        let mut names = Vec::with_capacity(hrefs.len());
        for href in hrefs {
            if let Some(name) = self.child_name(&request_path, &href)? {
                names.push(name);
            }
        }
        Ok(names)
    }

    fn delete(&self, path: &str) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE, path, &[])
            .map_err(StoreError::from)?;
        match response.status().as_u16() {
            status if response.status().is_success() => {
                log::debug!("DELETE {} -> {}", path, status);
                Ok(())
            }
            404 => Err(StoreError::NotFound {
                path: path.to_string(),
            }),
            status => Err(StoreError::UnexpectedStatus {
                verb: "DELETE",
                path: path.to_string(),
                status,
            }),
        }
    }

    fn mv(&self, source: &str, destination: &str) -> Result<(), StoreError> {
        let destination_url = self.url_for(destination).map_err(StoreError::from)?;
        let response = self
            .request(
                MOVE.clone(),
                source,
                &[("Destination", destination_url.as_str())],
            )
            .map_err(StoreError::from)?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::UnexpectedStatus {
                verb: "MOVE",
                path: source.to_string(),
                status: response.status().as_u16(),
            })
        }
    }
}
