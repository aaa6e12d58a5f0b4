// 認証モジュール

use sha2::{Digest, Sha256};

/// パスワードハッシュ化・検証（bcrypt）
pub mod password;

/// 認証ミドルウェア（トークン認証）
pub mod middleware;

/// 平文トークンの文字数
pub const TOKEN_LENGTH: usize = 40;

/// Authorizationヘッダーのスキーム名
pub const TOKEN_SCHEME: &str = "Token";

/// ランダムトークン生成
pub fn generate_token(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// トークンのSHA-256ハッシュを16進文字列で返す
///
/// DBには平文トークンを残さず、このハッシュのみ保存する。
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
