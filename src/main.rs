// ==========================================
// 数据导入预览 - 命令行入口
// ==========================================
// 用法:
//   import-preview <数据文件> <schema.json> [import_log.json] [--config <config.json>] [--json-log]
//
// schema.json: 单个单据类型元数据，或数组（首个为目标类型，其余为子表）
// 输出: 列模型与警告写 stderr，展平后的 CSV 写 stdout
// ==========================================

use anyhow::{bail, Context, Result};
use import_preview::config::{ConfigManager, PreviewConfigReader};
use import_preview::engine::{style_for, write_csv};
use import_preview::importer::{ParserOptions, UniversalFileParser};
use import_preview::{ControllerOptions, DoctypeMeta, ImportLogEntry, PreviewController, SchemaRegistry};
use std::path::{Path, PathBuf};

struct CliArgs {
    data_file: PathBuf,
    schema_file: PathBuf,
    import_log_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    json_log: bool,
}

fn parse_args() -> Result<CliArgs> {
    let mut positional = Vec::new();
    let mut config_file = None;
    let mut json_log = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            let path = args.next().context("--config 缺少路径参数")?;
            config_file = Some(PathBuf::from(path));
        } else if arg == "--json-log" {
            json_log = true;
        } else {
            positional.push(PathBuf::from(arg));
        }
    }

    let mut positional = positional.into_iter();
    let (Some(data_file), Some(schema_file)) = (positional.next(), positional.next()) else {
        bail!("用法: import-preview <数据文件> <schema.json> [import_log.json] [--config <config.json>] [--json-log]");
    };

    Ok(CliArgs {
        data_file,
        schema_file,
        import_log_file: positional.next(),
        config_file,
        json_log,
    })
}

/// 读取 schema 文件，返回 (注册表, 目标单据类型名)
fn load_schema(path: &Path) -> Result<(SchemaRegistry, String)> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("无法读取 schema 文件: {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;

    let metas: Vec<DoctypeMeta> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    let target = metas
        .first()
        .map(|m| m.name.clone())
        .context("schema 文件中没有单据类型")?;

    let mut registry = SchemaRegistry::new();
    for meta in metas {
        registry.register(meta);
    }
    Ok((registry, target))
}

fn load_import_log(path: Option<&Path>) -> Result<Vec<ImportLogEntry>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("无法读取导入日志: {}", path.display()))?;
    Ok(serde_json::from_str(&raw)?)
}

fn main() -> Result<()> {
    let args = parse_args()?;
    if args.json_log {
        import_preview::logging::init_json();
    } else {
        import_preview::logging::init();
    }

    let config = match &args.config_file {
        Some(path) => ConfigManager::from_file(path)?,
        None => ConfigManager::load_default()?,
    };
    config.apply_locale();

    tracing::info!("数据导入预览 v{}", import_preview::VERSION);

    let parser = UniversalFileParser::new(ParserOptions {
        skip_blank_rows: config.skip_blank_rows(),
    });
    let table = parser
        .parse(&args.data_file)
        .with_context(|| format!("无法解析数据文件: {}", args.data_file.display()))?;
    let (registry, doctype) = load_schema(&args.schema_file)?;
    let import_log = load_import_log(args.import_log_file.as_deref())?;

    let controller = PreviewController::new(
        registry,
        &doctype,
        table,
        import_log,
        ControllerOptions {
            labels: config.column_labels(),
            header_match_case_sensitive: config.header_match_case_sensitive(),
        },
    )?;
    let preview = controller.preview();

    for column in preview.columns() {
        let style = style_for(column);
        eprintln!(
            "[{:>3}] {:<32} {:<8} {:?}",
            column.header_index,
            column.title,
            column.class().to_string(),
            style.header
        );
    }
    if !preview.warnings().is_empty() {
        eprintln!("{}", preview.warnings().render_text());
    }
    let imported = (0..preview.rows().len())
        .filter(|&row| preview.is_row_imported(row))
        .count();
    eprintln!("已导入行: {}/{}", imported, preview.rows().len());

    let header: Vec<String> = preview.columns().iter().map(|c| c.title.clone()).collect();
    write_csv(&header, &preview.to_flat_rows(), std::io::stdout().lock())?;
    Ok(())
}
