use reqwest::Url;

use crate::error::RpcError;

pub(crate) fn parse_connection(connection: &str) -> Result<String, RpcError> {
    let parsed = Url::parse(connection).map_err(|e| {
        RpcError::Configuration(format!(
            "invalid endpoint `{connection}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(connection.to_owned()),
        other => Err(RpcError::Configuration(format!(
            "unsupported endpoint scheme `{other}`; expected http or https"
        ))),
    }
}

pub(super) fn resolve_auth(
    user: Option<&str>,
    pass: Option<&str>,
) -> Result<Option<(String, String)>, RpcError> {
    match (user, pass) {
        (Some(u), Some(p)) => Ok(Some((u.to_owned(), p.to_owned()))),
        (Some(_), None) | (None, Some(_)) => Err(RpcError::Configuration(
            "both api name and api password must be set together".to_owned(),
        )),
        (None, None) => Ok(None),
    }
}
