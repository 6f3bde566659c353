mod common;

use anyhow::{Context, Result};
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Response, StatusCode};
use serde_json::Value;

use common::{assert_redirects, TestServer};
use notes_service::forms::user::{INVALID_LOGIN, PASSWORD_MISMATCH, USERNAME_TAKEN};
use notes_service::forms::NON_FIELD_ERRORS;

const USERNAME: &str = "reader";
const PASSWORD: &str = "correct-horse-battery";

async fn sign_up(server: &TestServer, username: &str, password: &str) -> Result<Response> {
    Ok(server
        .anonymous()?
        .post(server.url("/auth/signup/"))
        .form(&[
            ("username", username),
            ("password1", password),
            ("password2", password),
        ])
        .send()
        .await?)
}

async fn log_in(server: &TestServer, query: &str, password: &str) -> Result<Response> {
    Ok(server
        .anonymous()?
        .post(server.url(&format!("/auth/login/{}", query)))
        .form(&[("username", USERNAME), ("password", password)])
        .send()
        .await?)
}

/// `name=value` of the session cookie set by a response
fn session_cookie(res: &Response) -> Result<String> {
    let header = res
        .headers()
        .get(SET_COOKIE)
        .context("no Set-Cookie header")?
        .to_str()?;
    let pair = header.split(';').next().unwrap_or_default();
    Ok(pair.trim().to_string())
}

#[tokio::test]
async fn signup_then_login_follows_next() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = sign_up(&server, USERNAME, PASSWORD).await?;
    assert_redirects(&res, "/auth/login/");

    let res = log_in(&server, "?next=/notes/", PASSWORD).await?;
    assert_redirects(&res, "/notes/");
    let cookie = session_cookie(&res)?;
    assert!(cookie.starts_with("notes_session="));

    let res = server
        .anonymous()?
        .get(server.url("/notes/"))
        .header(COOKIE, cookie)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn login_without_next_goes_home() -> Result<()> {
    let server = TestServer::spawn().await?;
    sign_up(&server, USERNAME, PASSWORD).await?;

    let res = log_in(&server, "", PASSWORD).await?;
    assert_redirects(&res, "/");
    Ok(())
}

#[tokio::test]
async fn login_ignores_offsite_next() -> Result<()> {
    let server = TestServer::spawn().await?;
    sign_up(&server, USERNAME, PASSWORD).await?;

    for next in ["https://evil.example/", "//evil.example/notes/"] {
        let res = log_in(&server, &format!("?next={}", next), PASSWORD).await?;
        assert_redirects(&res, "/");
    }
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    sign_up(&server, USERNAME, PASSWORD).await?;

    let res = log_in(&server, "?next=/notes/", "wrong-password").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().get(SET_COOKIE).is_none());

    let page = res.json::<Value>().await?;
    assert_eq!(page["data"]["form"]["errors"][NON_FIELD_ERRORS], INVALID_LOGIN);
    assert_eq!(page["data"]["form"]["fields"]["username"], USERNAME);
    assert_eq!(page["data"]["form"]["fields"]["password"], "");
    assert_eq!(page["data"]["next"], "/notes/");
    Ok(())
}

#[tokio::test]
async fn duplicate_username_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    sign_up(&server, USERNAME, PASSWORD).await?;

    let res = sign_up(&server, USERNAME, PASSWORD).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let page = res.json::<Value>().await?;
    assert_eq!(page["data"]["form"]["errors"]["username"], USERNAME_TAKEN);
    Ok(())
}

#[tokio::test]
async fn mismatched_passwords_are_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let res = server
        .anonymous()?
        .post(server.url("/auth/signup/"))
        .form(&[
            ("username", USERNAME),
            ("password1", PASSWORD),
            ("password2", "something-else"),
        ])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let page = res.json::<Value>().await?;
    assert_eq!(page["data"]["form"]["errors"]["password2"], PASSWORD_MISMATCH);
    Ok(())
}

#[tokio::test]
async fn logout_clears_session_cookie() -> Result<()> {
    let server = TestServer::spawn().await?;
    let user = server.create_user(USERNAME).await?;

    let res = server
        .client_for(&user)?
        .post(server.url("/auth/logout/"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let header = res
        .headers()
        .get(SET_COOKIE)
        .context("logout did not touch the session cookie")?
        .to_str()?;
    assert!(header.starts_with("notes_session=;"), "{}", header);
    assert!(header.contains("Max-Age=0"), "{}", header);
    Ok(())
}
