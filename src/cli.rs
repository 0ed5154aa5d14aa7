use clap::{Parser, Subcommand};
use ingredient_lens_common::DietaryType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ingredient-lens")]
#[command(about = "食品成分ラベルの安全性解析（モック）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ラベル画像を解析して結果を表示
    Analyze {
        /// 画像ファイルまたはフォルダ
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 表示する食事制限（複数指定可: vegan, keto, gluten-free ...）
        #[arg(short, long = "filter", value_name = "DIET")]
        filters: Vec<DietaryType>,

        /// 結果JSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 乱数シード（設定ファイルより優先）
        #[arg(long)]
        seed: Option<u64>,

        /// 失敗確率 0.0〜1.0（設定ファイルより優先）
        #[arg(long)]
        failure_rate: Option<f64>,

        /// 待機なしで即時に結果を返す
        #[arg(long)]
        no_delay: bool,

        /// 失敗時の再試行・フィルタ選択を対話で行う
        #[arg(short, long)]
        interactive: bool,
    },

    /// 固定の解析結果サンプルを一覧表示
    Samples,

    /// 設定管理
    Config {
        /// 失敗確率を設定
        #[arg(long)]
        set_failure_rate: Option<f64>,

        /// タイムアウト(ms)を設定
        #[arg(long)]
        set_timeout_ms: Option<u64>,

        /// 乱数シードを設定
        #[arg(long, conflicts_with = "clear_seed")]
        set_seed: Option<u64>,

        /// 乱数シードを解除
        #[arg(long)]
        clear_seed: bool,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
