use std::borrow::Cow;

/// Credentials used to sign a token exchange.
///
/// Leg one only needs the consumer pair; leg three additionally carries the
/// request token pair obtained from leg one, attached with
/// [`token`](Secrets::token).
#[derive(Debug, Clone)]
pub struct Secrets<'a> {
    consumer_key: Cow<'a, str>,
    consumer_secret: Cow<'a, str>,
    token: Option<(Cow<'a, str>, Cow<'a, str>)>,
}

impl<'a> Secrets<'a> {
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<Cow<'a, str>>,
        TSecret: Into<Cow<'a, str>>,
    {
        Secrets {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: None,
        }
    }

    /// Attaches a token pair, consuming the builder.
    pub fn token<TKey, TSecret>(self, token: TKey, token_secret: TSecret) -> Self
    where
        TKey: Into<Cow<'a, str>>,
        TSecret: Into<Cow<'a, str>>,
    {
        Secrets {
            token: Some((token.into(), token_secret.into())),
            ..self
        }
    }

    pub(crate) fn consumer_key_pair(&self) -> (&str, &str) {
        (&self.consumer_key, &self.consumer_secret)
    }

    pub(crate) fn token_option_pair(&self) -> (Option<&str>, Option<&str>) {
        match &self.token {
            Some((token, secret)) => (Some(token.as_ref()), Some(secret.as_ref())),
            None => (None, None),
        }
    }
}
