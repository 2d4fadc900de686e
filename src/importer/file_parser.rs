// ==========================================
// 数据导入预览 - 文件解析器实现
// ==========================================
// 职责: 读取导入文件为原始表格（表头 + 数据行）
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 规则: 表头 TRIM；单元格不 TRIM，空单元格 → Null
// ==========================================

use crate::domain::payload::RawTable;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use serde_json::Value;
use std::fs::File;
use std::path::Path;
use tracing::debug;

// ==========================================
// FileParser Trait
// ==========================================
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表格
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// 跳过完全空白的行
    pub skip_blank_rows: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            skip_blank_rows: true,
        }
    }
}

fn check_file(path: &Path, allowed: &[&str]) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !allowed.contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedFormat(ext));
    }
    Ok(())
}

fn push_row(rows: &mut Vec<Vec<Value>>, row: Vec<Value>, options: &ParserOptions) {
    if options.skip_blank_rows && row.iter().all(Value::is_null) {
        return;
    }
    rows.push(row);
}

// ==========================================
// CSV Parser 实现
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CsvParser {
    pub options: ParserOptions,
}

impl FileParser for CsvParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        check_file(file_path, &["csv"])?;

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let header_row: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if header_row.iter().all(String::is_empty) {
            return Err(ImportError::MissingHeader(file_path.display().to_string()));
        }

        // 读取所有行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row = record
                .iter()
                .map(|value| {
                    if value.is_empty() {
                        Value::Null
                    } else {
                        Value::String(value.to_string())
                    }
                })
                .collect();
            push_row(&mut rows, row, &self.options);
        }

        debug!(columns = header_row.len(), rows = rows.len(), "CSV 解析完成");
        Ok(RawTable { header_row, rows })
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ExcelParser {
    pub options: ParserOptions,
}

/// Excel 单元格 → JSON 值（整数值浮点数按整数保留）
fn excel_cell(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) if s.is_empty() => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::from(*i),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Value::from(*f as i64),
        Data::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Data::Bool(b) => Value::Bool(*b),
        other => Value::String(other.to_string()),
    }
}

impl FileParser for ExcelParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        check_file(file_path, &["xlsx", "xls"])?;

        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut sheet_rows = range.rows();
        let header_row: Vec<String> = sheet_rows
            .next()
            .ok_or_else(|| ImportError::MissingHeader(file_path.display().to_string()))?
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        // 读取数据行
        let mut rows = Vec::new();
        for data_row in sheet_rows {
            push_row(&mut rows, data_row.iter().map(excel_cell).collect(), &self.options);
        }

        debug!(sheet = %sheet_name, columns = header_row.len(), rows = rows.len(), "Excel 解析完成");
        Ok(RawTable { header_row, rows })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct UniversalFileParser {
    pub options: ParserOptions,
}

impl UniversalFileParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser {
                options: self.options,
            }
            .parse_to_table(path),
            "xlsx" | "xls" => ExcelParser {
                options: self.options,
            }
            .parse_to_table(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
