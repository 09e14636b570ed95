// Eコマース注文処理システム
// ドメイン駆動設計のレイヤー構成（domain / application / adapter）

pub mod adapter;
pub mod application;
pub mod domain;
