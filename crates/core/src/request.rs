use url::Url;

use crate::content::ContentType;
use crate::error::NotificationError;
use crate::method::HttpMethod;

/// A validated outbound notification.
///
/// The only way to obtain one is [`NotificationRequest::parse`], so holding a
/// value means the URL, method, content type, and body have all been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    url: Url,
    method: HttpMethod,
    content_type: ContentType,
    body: String,
}

impl NotificationRequest {
    /// Validate raw caller input and build a request.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    ///
    /// 1. the URL is present, then absolute `http`/`https` with a host,
    /// 2. the method is present, then one of [`HttpMethod::ALL`],
    /// 3. the content type is present, then one of [`ContentType::ALL`],
    /// 4. the body is present, then well-formed for its content type.
    ///
    /// An absent value is passed as an empty string.
    pub fn parse(
        url: &str,
        method: &str,
        content_type: &str,
        body: &str,
    ) -> Result<Self, NotificationError> {
        let url = parse_url(url)?;
        let method: HttpMethod = method.parse()?;
        let content_type: ContentType = content_type.parse()?;
        content_type.validate_body(body)?;

        Ok(Self {
            url,
            method,
            content_type,
            body: body.to_owned(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consume the request, returning the body.
    pub fn into_body(self) -> String {
        self.body
    }
}

fn parse_url(raw: &str) -> Result<Url, NotificationError> {
    if raw.is_empty() {
        return Err(NotificationError::MissingUrl);
    }

    let url = Url::parse(raw).map_err(|e| NotificationError::InvalidUrl(format!("{raw}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(NotificationError::InvalidUrl(format!(
            "{raw}: scheme `{}` is not http or https",
            url.scheme()
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(NotificationError::InvalidUrl(format!("{raw}: missing host")));
    }

    Ok(url)
}
