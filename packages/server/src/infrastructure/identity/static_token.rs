//! 固定トークン表を使った IdentityResolver 実装
//!
//! 起動時に `TOKEN=USERNAME` の組を受け取り、トークンからユーザー名を引きます。

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{AuthError, Identity, IdentityResolver, ValueObjectError};

/// トークン表の設定エラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenConfigError {
    /// `TOKEN=USERNAME` の形式になっていない
    #[error("Token entry must be TOKEN=USERNAME (got: '{0}')")]
    MalformedEntry(String),

    /// ユーザー名が Identity として不正
    #[error("Invalid username for token entry: {0}")]
    InvalidUsername(#[from] ValueObjectError),
}

/// 固定トークン表の IdentityResolver
#[derive(Debug, Clone, Default)]
pub struct StaticTokenResolver {
    tokens: HashMap<String, Identity>,
}

impl StaticTokenResolver {
    /// 新しい StaticTokenResolver を作成
    pub fn new(tokens: HashMap<String, Identity>) -> Self {
        Self { tokens }
    }

    /// `TOKEN=USERNAME` 形式のエントリ列から作成
    ///
    /// # Errors
    ///
    /// 形式が不正、またはユーザー名が不正なエントリがあれば `TokenConfigError`
    pub fn from_entries<I, S>(entries: I) -> Result<Self, TokenConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = HashMap::new();
        for entry in entries {
            let (token, identity) = parse_token_entry(entry.as_ref())?;
            tokens.insert(token, identity);
        }
        Ok(Self::new(tokens))
    }

    /// 登録済みトークン数
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// `TOKEN=USERNAME` を分解する
pub fn parse_token_entry(entry: &str) -> Result<(String, Identity), TokenConfigError> {
    let Some((token, username)) = entry.split_once('=') else {
        return Err(TokenConfigError::MalformedEntry(entry.to_string()));
    };
    if token.is_empty() {
        return Err(TokenConfigError::MalformedEntry(entry.to_string()));
    }
    let identity = Identity::new(username.to_string())?;
    Ok((token.to_string(), identity))
}

#[async_trait]
impl IdentityResolver for StaticTokenResolver {
    async fn resolve(&self, credential: &str) -> Result<Identity, AuthError> {
        self.tokens
            .get(credential)
            .cloned()
            .ok_or(AuthError::Unauthorized)
    }
}
