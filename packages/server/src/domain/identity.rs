//! Identity Resolver trait 定義

use async_trait::async_trait;

use super::{AuthError, Identity};

/// Identity Resolver trait
///
/// ベアラー資格情報を検証し、呼び出し元の Identity を返す外部コラボレーター。
/// 接続ごとに認証時に 1 回だけ呼ばれる。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// 資格情報から Identity を解決する
    async fn resolve(&self, credential: &str) -> Result<Identity, AuthError>;
}
