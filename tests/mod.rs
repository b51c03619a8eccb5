// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

use std::convert::Infallible;
use std::net::{Ipv4Addr, TcpListener};
use std::sync::{Arc, Mutex};

use cupt::app::{self, Summary};
use cupt::client::{Client, Url};
use cupt::types::{Challenge, ClientId, Credentials, PoolId};

use futures::channel::oneshot::channel;
use hyper::header::{HeaderMap, CONNECTION, CONTENT_TYPE};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use serde_json::{json, Value};

const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService.";

/// A minimal stand-in for the directory service speaking its JSON protocol
#[derive(Debug, Default)]
struct Service {
    users: Vec<Value>,
    reject: Option<String>,
    created: Mutex<Vec<Value>>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl Service {
    fn respond(&self, action: &str, input: Value) -> (StatusCode, Value) {
        match action {
            "ListUsers" => {
                let limit = input["Limit"].as_u64().unwrap() as usize;
                let start = input["PaginationToken"]
                    .as_str()
                    .map(|token| token.parse().unwrap())
                    .unwrap_or(0);
                let end = self.users.len().min(start + limit);
                let mut out = json!({ "Users": self.users[start..end] });
                if end < self.users.len() {
                    out["PaginationToken"] = json!(end.to_string());
                }
                (StatusCode::OK, out)
            }
            "AdminCreateUser" => {
                if input["Username"].as_str() == self.reject.as_deref() {
                    return (
                        StatusCode::BAD_REQUEST,
                        json!({
                            "__type": "UsernameExistsException",
                            "message": "User account already exists"
                        }),
                    );
                }
                let user = json!({
                    "Username": input["Username"],
                    "Attributes": input["UserAttributes"],
                    "UserStatus": "FORCE_CHANGE_PASSWORD"
                });
                self.created.lock().unwrap().push(input);
                (StatusCode::OK, json!({ "User": user }))
            }
            "AdminInitiateAuth" => (
                StatusCode::OK,
                json!({
                    "ChallengeName": Challenge::NEW_PASSWORD_REQUIRED,
                    "ChallengeParameters": {},
                    "Session": "session-1"
                }),
            ),
            "AdminRespondToAuthChallenge" => (
                StatusCode::OK,
                json!({
                    "AuthenticationResult": {
                        "AccessToken": "access",
                        "ExpiresIn": 3600,
                        "IdToken": "id",
                        "RefreshToken": "refresh",
                        "TokenType": "Bearer"
                    },
                    "ChallengeParameters": {}
                }),
            ),
            _ => (
                StatusCode::BAD_REQUEST,
                json!({ "__type": "UnknownOperationException" }),
            ),
        }
    }

    fn handle(&self, headers: &HeaderMap, body: &[u8]) -> (StatusCode, Value) {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        let signed = header("authorization").is_some_and(|v| {
            v.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/")
                && v.contains("/us-east-1/cognito-idp/aws4_request, ")
                && v.contains("SignedHeaders=content-type;host;x-amz-date;x-amz-target, ")
        });
        if !signed {
            return (
                StatusCode::FORBIDDEN,
                json!({ "__type": "UnrecognizedClientException" }),
            );
        }
        assert_eq!(header("content-type"), Some("application/x-amz-json-1.1"));

        let Some(action) = header("x-amz-target").and_then(|v| v.strip_prefix(TARGET_PREFIX))
        else {
            return (
                StatusCode::BAD_REQUEST,
                json!({ "__type": "UnknownOperationException" }),
            );
        };
        let input: Value = serde_json::from_slice(body).unwrap();
        self.requests
            .lock()
            .unwrap()
            .push((action.into(), input.clone()));
        self.respond(action, input)
    }
}

async fn handle(svc: Arc<Service>, req: Request<Body>) -> Result<Response<Body>, Infallible> {
    assert_eq!(req.method(), Method::POST);
    assert_eq!(req.uri().path(), "/");

    let (parts, body) = req.into_parts();
    let body = hyper::body::to_bytes(body).await.unwrap();
    let (status, out) = svc.handle(&parts.headers, &body);
    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/x-amz-json-1.1")
        .header(CONNECTION, "close")
        .body(Body::from(out.to_string()))
        .unwrap())
}

fn connect(url: Url) -> Client {
    Client::builder(Credentials {
        access_key_id: "AKIDEXAMPLE".into(),
        secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".into(),
        region: "us-east-1".into(),
    })
    .endpoint(url)
    .build()
    .unwrap()
}

/// Serves `svc` on a local port while `f` drives a blocking client against it.
async fn serve<T, F>(svc: Service, f: F) -> (Arc<Service>, T)
where
    T: Send + 'static,
    F: FnOnce(Client) -> T + Send + 'static,
{
    let lis = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    let url: Url = format!("http://{}/", lis.local_addr().unwrap())
        .parse()
        .unwrap();

    let svc = Arc::new(svc);
    let make_svc = {
        let svc = Arc::clone(&svc);
        make_service_fn(move |_| {
            let svc = Arc::clone(&svc);
            async move {
                Ok::<_, Infallible>(service_fn(move |req| handle(Arc::clone(&svc), req)))
            }
        })
    };

    let (tx, rx) = channel::<()>();
    let srv = tokio::spawn(
        Server::from_tcp(lis)
            .unwrap()
            .serve(make_svc)
            .with_graceful_shutdown(async move { rx.await.ok().unwrap() }),
    );
    let out = tokio::task::spawn_blocking(move || f(connect(url)))
        .await
        .unwrap();

    // Stop server
    assert_eq!(tx.send(()), Ok(()));
    assert!(matches!(srv.await, Ok(Ok(()))));
    (svc, out)
}

fn user(i: usize) -> Value {
    json!({
        "Username": format!("user{i}"),
        "Attributes": [
            { "Name": "sub", "Value": format!("5e1f-{i}") },
            { "Name": "email", "Value": format!("user{i}@example.com") },
        ],
        "Enabled": true,
        "UserStatus": "CONFIRMED",
        "UserCreateDate": 1.6e9 + i as f64,
    })
}

fn pool() -> PoolId {
    "us-east-1_aBcD3fG".parse().unwrap()
}

fn client_id() -> ClientId {
    "1example23456789".parse().unwrap()
}

#[tokio::test]
async fn backup_restore() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("users.json");

    let (src, n) = serve(
        Service {
            users: (0..12).map(user).collect(),
            ..Default::default()
        },
        {
            let path = path.clone();
            move |cl| app::backup(&cl, &pool(), &path).unwrap()
        },
    )
    .await;
    assert_eq!(n, 12);

    let requests = src.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|(action, _)| action == "ListUsers"));
    assert_eq!(
        requests[0].1,
        json!({ "UserPoolId": "us-east-1_aBcD3fG", "Limit": 5 })
    );
    assert_eq!(
        requests[2].1,
        json!({ "UserPoolId": "us-east-1_aBcD3fG", "Limit": 5, "PaginationToken": "10" })
    );

    // The snapshot holds every listed field in listing order.
    let doc: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(doc, Value::Array(src.users.clone()));

    let (dst, summary) = serve(
        Service {
            reject: Some("user3".into()),
            ..Default::default()
        },
        move |cl| app::restore_file(&cl, &pool(), &path).unwrap(),
    )
    .await;
    assert_eq!(
        summary,
        Summary {
            restored: 11,
            total: 12
        }
    );

    let created = dst.created.lock().unwrap();
    assert_eq!(created.len(), 11);
    assert_eq!(created[3]["Username"], "user4");
    assert_eq!(
        created[3]["UserAttributes"],
        json!([{ "Name": "email", "Value": "user4@example.com" }])
    );
    assert_eq!(created[3]["TemporaryPassword"].as_str().unwrap().len(), 64);
    assert_eq!(created[3]["UserPoolId"], "us-east-1_aBcD3fG");
}

#[tokio::test]
async fn add_user() {
    let (svc, account) = serve(Service::default(), |cl| {
        app::add_user(&cl, &pool(), &client_id(), "new@example.com", "Perm4nent!").unwrap()
    })
    .await;
    assert_eq!(account.tokens.access_token, "access");
    assert_eq!(account.tokens.id_token.as_deref(), Some("id"));

    let requests = svc.requests.lock().unwrap();
    let actions: Vec<_> = requests.iter().map(|(action, _)| action.as_str()).collect();
    assert_eq!(
        actions,
        [
            "AdminCreateUser",
            "AdminInitiateAuth",
            "AdminRespondToAuthChallenge"
        ]
    );
    assert_eq!(
        requests[0].1["UserAttributes"],
        json!([
            { "Name": "email", "Value": "new@example.com" },
            { "Name": "email_verified", "Value": "true" }
        ])
    );
    assert_eq!(requests[1].1["AuthFlow"], "ADMIN_NO_SRP_AUTH");
    assert_eq!(requests[1].1["AuthParameters"]["USERNAME"], account.username);
    assert_eq!(
        requests[1].1["AuthParameters"]["PASSWORD"],
        requests[0].1["TemporaryPassword"]
    );
    assert_eq!(
        requests[2].1,
        json!({
            "ChallengeName": "NEW_PASSWORD_REQUIRED",
            "UserPoolId": "us-east-1_aBcD3fG",
            "ClientId": "1example23456789",
            "ChallengeResponses": {
                "USERNAME": account.username,
                "NEW_PASSWORD": "Perm4nent!"
            },
            "Session": "session-1"
        })
    );
}

#[tokio::test]
async fn service_error() {
    let (svc, (summary, err)) = serve(
        Service {
            reject: Some("taken".into()),
            ..Default::default()
        },
        |cl| {
            let summary = app::restore(
                &cl,
                &pool(),
                serde_json::from_value::<Vec<_>>(json!([{ "Username": "taken" }])).unwrap(),
            );
            let err = app::login(&cl, &pool(), &client_id(), "taken", "secret").unwrap_err();
            (summary, err)
        },
    )
    .await;
    assert_eq!(
        summary,
        Summary {
            restored: 0,
            total: 1
        }
    );
    assert!(svc.created.lock().unwrap().is_empty());
    assert!(format!("{err:#}").contains("NEW_PASSWORD_REQUIRED"), "{err:#}");
}
