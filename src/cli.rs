use clap::{Parser, Subcommand, ValueEnum};
use patent_class_counter::domain::report::{SortDirection, SortField, SortSpec};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Patent class counter (records + classification tallies)")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// 特許レコードを追加
    Add {
        /// タイトル（完全一致で重複判定）
        title: String,
        /// 分類テキスト（省略時は --classes-file か標準入力）
        #[arg(long, conflicts_with = "classes_file")]
        classes: Option<String>,
        /// 分類テキストを読むファイル
        #[arg(long)]
        classes_file: Option<PathBuf>,
        /// Google Patents の URL
        #[arg(long)]
        url: Option<String>,
        /// 画像ファイル
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// レコードを削除
    Remove { id: i64 },
    /// レコード一覧（タイトル順）
    List {
        /// タイトルの部分一致（大文字小文字を区別しない）
        #[arg(long, default_value = "")]
        filter: String,
        /// ページ番号（1 から）
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// レコードに画像を設定
    Photo { id: i64, path: PathBuf },
    /// メジャー分類の件数表
    Majors {
        #[command(flatten)]
        sort: SortArgs,
    },
    /// マイナー分類の件数表
    Minors {
        #[command(flatten)]
        sort: SortArgs,
    },
    /// 調査済みマークの切り替え
    Complete {
        #[command(subcommand)]
        target: CompleteCmd,
    },
    /// CSV 出力（パス省略時は標準出力）
    Export { path: Option<PathBuf> },
    /// 集計値を全レコードの再解析結果と照合
    Verify {
        /// 不一致なら再解析結果で置き換える
        #[arg(long)]
        repair: bool,
    },
    /// すべてのデータを消去
    Reset,
    /// 各種設定操作
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
}

#[derive(Subcommand)]
pub enum CompleteCmd {
    Major { major: String },
    Minor { major: String, minor: String },
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// 設定値を変更
    Set {
        #[command(subcommand)]
        field: ConfigField,
    },
    /// 現在の設定を表示
    Show,
}

#[derive(Subcommand)]
pub enum ConfigField {
    /// 保存先ディレクトリを指定（既存データは移動）
    #[command(name = "store-dir")]
    StoreDir { path: PathBuf },
    /// 一覧の 1 ページあたり件数
    #[command(name = "page-size")]
    PageSize { size: usize },
}

#[derive(clap::Args, Debug, Clone, Copy)]
pub struct SortArgs {
    #[arg(long, value_enum, default_value_t = SortKeyArg::Count)]
    pub sort: SortKeyArg,
    #[arg(long, value_enum, default_value_t = OrderArg::Desc)]
    pub order: OrderArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKeyArg {
    Count,
    Class,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<SortArgs> for SortSpec {
    fn from(args: SortArgs) -> Self {
        let field = match args.sort {
            SortKeyArg::Count => SortField::Count,
            SortKeyArg::Class => SortField::Class,
        };
        let direction = match args.order {
            OrderArg::Asc => SortDirection::Asc,
            OrderArg::Desc => SortDirection::Desc,
        };
        SortSpec::new(field, direction)
    }
}
