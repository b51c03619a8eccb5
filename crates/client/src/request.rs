// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

use super::sign::{self, Signer};
use super::{Client, Result, SERVICE};

use std::collections::BTreeMap;

use anyhow::{anyhow, Context};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::trace;
use url::Url;

const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";

/// Error body returned by the service on a non-2xx status
#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(rename = "__type", default)]
    kind: String,

    #[serde(alias = "Message", default)]
    message: String,
}

impl ServiceError {
    /// Returns the exception name without the optional namespace prefix.
    fn name(&self) -> &str {
        self.kind.rsplit('#').next().unwrap_or_default()
    }
}

fn parse_ureq_error(e: ureq::Error) -> anyhow::Error {
    match e {
        ureq::Error::Status(code, res) => {
            let body = match res.into_string() {
                Ok(body) => body,
                Err(_) => return anyhow!("request failed with status code `{code}`"),
            };
            match serde_json::from_str::<ServiceError>(&body) {
                Ok(err) if !err.kind.is_empty() => anyhow!("{}: {}", err.name(), err.message)
                    .context(format!("request failed with status code `{code}`")),
                _ if !body.is_empty() => {
                    anyhow!(body).context(format!("request failed with status code `{code}`"))
                }
                _ => anyhow!("request failed with status code `{code}`"),
            }
        }

        ureq::Error::Transport(e) => anyhow::Error::new(e).context("transport layer failure"),
    }
}

fn host(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .ok_or_else(|| anyhow!("endpoint URL `{url}` has no host"))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.into(),
    })
}

impl Client {
    /// Invokes the service `action` with `input` as the JSON body and decodes
    /// the JSON response.
    pub(crate) fn call<T, U>(&self, action: &str, input: &T) -> Result<U>
    where
        T: Serialize,
        U: DeserializeOwned,
    {
        trace!(target: "cupt::client", "calling `{action}`");

        let body = serde_json::to_vec(input).context("failed to encode request as JSON")?;
        let now = Utc::now();
        let headers = BTreeMap::from([
            ("content-type".to_string(), CONTENT_TYPE.to_string()),
            ("host".to_string(), host(&self.root)?),
            (
                "x-amz-date".to_string(),
                now.format(sign::TIMESTAMP_FORMAT).to_string(),
            ),
            (
                "x-amz-target".to_string(),
                format!("{TARGET_PREFIX}.{action}"),
            ),
        ]);
        let authorization = Signer::new(&self.credentials, SERVICE).authorization(
            &sign::Request {
                method: "POST",
                path: self.root.path(),
                query: self.root.query().unwrap_or_default(),
                headers: &headers,
                payload: &body,
            },
            now,
        );

        let req = headers
            .iter()
            .filter(|(name, _)| name.as_str() != "host")
            .fold(self.inner.post(self.root.as_str()), |req, (name, value)| {
                req.set(name, value)
            })
            .set("Authorization", &authorization);
        let res = req
            .send_bytes(&body)
            .map_err(parse_ureq_error)
            .with_context(|| format!("`{action}` request failed"))?;
        serde_json::from_reader(res.into_reader())
            .with_context(|| format!("failed to decode `{action}` response"))
    }
}
