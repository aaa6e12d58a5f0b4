// パスワード処理（bcrypt）

use crate::common::error::RecipeError;
use bcrypt::{hash, verify};

// コスト13では登録・トークン発行のたびに0.5秒近く食うため12に留める
const HASH_COST: u32 = 12;

/// 平文パスワードから保存用のbcryptハッシュを生成する
///
/// ソルトは毎回ランダムなので、同じパスワードでも出力は呼び出しごとに
/// 異なる。平文はこの関数の外には保存しない。
pub fn hash_password(password: &str) -> Result<String, RecipeError> {
    hash(password, HASH_COST)
        .map_err(|e| RecipeError::PasswordHash(format!("Failed to hash password: {}", e)))
}

/// 平文パスワードを保存済みハッシュと照合する
///
/// # Returns
/// * `Ok(true)` / `Ok(false)` - 照合結果
/// * `Err(RecipeError)` - ハッシュ文字列がbcrypt形式でない
pub fn verify_password(password: &str, hash: &str) -> Result<bool, RecipeError> {
    verify(password, hash)
        .map_err(|e| RecipeError::PasswordHash(format!("Failed to verify password: {}", e)))
}
