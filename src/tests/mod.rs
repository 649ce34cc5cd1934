//! 結合寄りのテスト（一時ディレクトリで実ファイルを使う）

mod history_store_tests;
mod render_tests;
