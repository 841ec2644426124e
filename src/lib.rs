//! Auth Server
//!
//! 사용자(이메일/비밀번호)와 머신 클라이언트(id/secret)에게 bearer 토큰을 발급하고,
//! 사용자당 하나의 Refresh Token을 회전/폐기하는 인증 서버.

pub mod domains;
pub mod routes;
pub mod shared;
