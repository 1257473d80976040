//! UseCase: 接続の認証処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AuthenticateUseCase::execute() メソッド
//! - 資格情報の検証と Connecting 状態のセッション生成
//!
//! ### どのような状況を想定しているか
//! - 正常系：有効なトークン
//! - 異常系：トークンなし、無効なトークン（Registry には一切触れない）

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{IdentityResolver, RoomId, Session, SessionIdFactory, Timestamp};

use super::error::AuthenticateError;

/// 接続認証のユースケース
pub struct AuthenticateUseCase {
    /// IdentityResolver（資格情報検証の抽象化）
    resolver: Arc<dyn IdentityResolver>,
    clock: Arc<dyn Clock>,
}

impl AuthenticateUseCase {
    /// 新しい AuthenticateUseCase を作成
    pub fn new(resolver: Arc<dyn IdentityResolver>, clock: Arc<dyn Clock>) -> Self {
        Self { resolver, clock }
    }

    /// 認証を実行
    ///
    /// # Arguments
    ///
    /// * `credential` - ハンドシェイクから取り出したベアラートークン
    /// * `room_id` - リクエストパスのルーム ID
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - Connecting 状態の新しいセッション
    /// * `Err(AuthenticateError)` - 資格情報がない、または無効
    pub async fn execute(
        &self,
        credential: Option<&str>,
        room_id: RoomId,
    ) -> Result<Session, AuthenticateError> {
        let credential = credential.ok_or(AuthenticateError::MissingCredential)?;

        let identity = self
            .resolver
            .resolve(credential)
            .await
            .map_err(|_| AuthenticateError::Unauthorized)?;

        Ok(Session::new(
            SessionIdFactory::generate(),
            identity,
            room_id,
            Timestamp::new(self.clock.now_jst_millis()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthError, Identity, MockIdentityResolver, SessionStatus};
    use hiroba_shared::time::FixedClock;

    fn room() -> RoomId {
        RoomId::new("r1".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        // テスト項目: 有効なトークンで Connecting 状態のセッションが作られる
        // given (前提条件):
        let mut resolver = MockIdentityResolver::new();
        resolver
            .expect_resolve()
            .times(1)
            .returning(|credential| match credential {
                "t-alice" => Ok(Identity::new("alice".to_string()).unwrap()),
                _ => Err(AuthError::Unauthorized),
            });
        let usecase = AuthenticateUseCase::new(Arc::new(resolver), Arc::new(FixedClock::new(1000)));

        // when (操作):
        let session = usecase.execute(Some("t-alice"), room()).await.unwrap();

        // then (期待する結果):
        assert_eq!(session.identity().as_str(), "alice");
        assert_eq!(session.room_id(), &room());
        assert_eq!(session.status(), SessionStatus::Connecting);
        assert_eq!(session.connected_at(), Timestamp::new(1000));
    }

    #[tokio::test]
    async fn test_authenticate_missing_credential() {
        // テスト項目: トークンがない場合は resolver を呼ばずにエラー
        // given (前提条件):
        let mut resolver = MockIdentityResolver::new();
        resolver.expect_resolve().times(0);
        let usecase = AuthenticateUseCase::new(Arc::new(resolver), Arc::new(FixedClock::new(0)));

        // when (操作):
        let result = usecase.execute(None, room()).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), AuthenticateError::MissingCredential);
    }

    #[tokio::test]
    async fn test_authenticate_invalid_credential() {
        // テスト項目: 無効なトークンは Unauthorized
        // given (前提条件):
        let mut resolver = MockIdentityResolver::new();
        resolver
            .expect_resolve()
            .returning(|_| Err(AuthError::Unauthorized));
        let usecase = AuthenticateUseCase::new(Arc::new(resolver), Arc::new(FixedClock::new(0)));

        // when (操作):
        let result = usecase.execute(Some("bogus"), room()).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), AuthenticateError::Unauthorized);
    }
}
