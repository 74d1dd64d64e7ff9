use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, Command};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use catalog_filter::CatalogBuilder;
use utils_common::Product;

mod extract;

use extract::CardExtractor;

/// 输出文件名
const CATALOG_INDEX_FILE: &str = "catalog_index.bin";

fn main() {
    let matches = Command::new("商品目录索引生成器")
        .version(env!("CARGO_PKG_VERSION"))
        .about("从渲染后的商品页面生成筛选用的目录索引")
        .arg(Arg::new("source")
            .short('s')
            .long("source")
            .value_name("SOURCE_DIR")
            .help("页面源目录路径")
            .required(true))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .value_name("OUTPUT_DIR")
            .help("索引输出目录路径")
            .required(true))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("显示详细信息")
            .action(ArgAction::SetTrue))
        .get_matches();

    let source_dir = PathBuf::from(matches.get_one::<String>("source").map(String::as_str).unwrap_or_default());
    let output_dir = PathBuf::from(matches.get_one::<String>("output").map(String::as_str).unwrap_or_default());
    let verbose = matches.get_flag("verbose");

    init_tracing(verbose);

    match generate_index(&source_dir, &output_dir) {
        Ok(path) => info!(path = %path.display(), "索引生成成功"),
        Err(e) => {
            eprintln!("错误: 索引生成失败: {:#}", e);
            std::process::exit(1);
        }
    }
}

// RUST_LOG 优先，否则按 --verbose 决定级别
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 扫描页面、构建目录并写入索引文件，返回索引路径
fn generate_index(source_dir: &Path, output_dir: &Path) -> Result<PathBuf> {
    let start_time = Instant::now();

    if !source_dir.is_dir() {
        bail!("源目录不存在或不是有效目录 '{}'", source_dir.display());
    }
    fs::create_dir_all(output_dir)
        .with_context(|| format!("无法创建输出目录 '{}'", output_dir.display()))?;

    info!(source = %source_dir.display(), output = %output_dir.display(), "开始生成索引");

    let products = scan_html_files(source_dir)?;
    if products.is_empty() {
        bail!("没有找到商品卡片");
    }

    let mut builder = CatalogBuilder::new();
    for product in products {
        builder.add_product(product);
    }

    let index_path = output_dir.join(CATALOG_INDEX_FILE);
    builder
        .save_catalog_index(&index_path)
        .with_context(|| format!("无法写入目录索引 '{}'", index_path.display()))?;

    info!(
        products = builder.len(),
        elapsed_secs = start_time.elapsed().as_secs_f32(),
        "索引生成完成"
    );
    Ok(index_path)
}

/// 按路径顺序扫描 HTML 文件，返回按出现顺序排列的商品
fn scan_html_files(dir_path: &Path) -> Result<Vec<Product>> {
    let extractor = CardExtractor::new()?;
    let mut products = Vec::new();
    let mut html_files = 0;
    let mut skipped_cards = 0;

    for entry in WalkDir::new(dir_path).sort_by_file_name() {
        let entry = entry.context("遍历目录时出错")?;

        let is_html = entry.path().extension().map_or(false, |ext| ext == "html");
        if !entry.file_type().is_file() || !is_html {
            continue;
        }
        html_files += 1;

        let html = match fs::read_to_string(entry.path()) {
            Ok(html) => html,
            Err(e) => {
                warn!(file = %entry.path().display(), error = %e, "无法读取文件");
                continue;
            }
        };

        match extractor.extract_from_html(&html) {
            Ok(page) => {
                debug!(
                    file = %entry.path().display(),
                    products = page.products.len(),
                    skipped = page.skipped,
                    "处理页面"
                );
                skipped_cards += page.skipped;
                products.extend(page.products);
            }
            Err(e) => warn!(file = %entry.path().display(), error = %e, "解析文件时出错"),
        }
    }

    info!(
        html_files,
        products = products.len(),
        skipped_cards,
        "扫描完成"
    );
    Ok(products)
}
