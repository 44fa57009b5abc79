//! URL templating for provider endpoints.
//!
//! Templates use `{name}` placeholders. Values are percent-encoded; a
//! placeholder without a non-empty value is an error.

use crate::domain::error::PricewatchError;
use url::form_urlencoded;

/// Ordered name/value pairs. `None` values are skipped in query strings.
pub type Params<'a> = [(&'a str, Option<&'a str>)];

pub fn apply_template(template: &str, vars: &Params<'_>) -> Result<String, PricewatchError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if close > 0 => {
                out.push_str(&rest[..open]);
                let key = after[..close].trim();
                let value = lookup(vars, key)
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| PricewatchError::MissingTemplateVar {
                        key: key.to_string(),
                    })?;
                out.push_str(&urlencoding::encode(value));
                rest = &after[close + 1..];
            }
            _ => {
                out.push_str(&rest[..=open]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}

/// `?a=1&b=2` in the given order, or an empty string when nothing is set.
pub fn to_query_string(params: &Params<'_>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in params {
        if let Some(value) = value {
            serializer.append_pair(key, value);
            any = true;
        }
    }
    if any {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}

pub fn build_url(
    template: &str,
    path_vars: &Params<'_>,
    query_params: &Params<'_>,
) -> Result<String, PricewatchError> {
    Ok(apply_template(template, path_vars)? + &to_query_string(query_params))
}

fn lookup<'a>(vars: &Params<'a>, key: &str) -> Option<&'a str> {
    vars.iter().find(|(k, _)| *k == key).and_then(|(_, v)| *v)
}
