// ==========================================
// 数据导入预览 - 配置读取 Trait
// ==========================================
// 职责: 定义预览引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

// ==========================================
// PreviewConfigReader Trait
// ==========================================
// 实现者: ConfigManager（JSON 配置文件）
pub trait PreviewConfigReader: Send + Sync {
    /// 界面语言
    ///
    /// # 默认值
    /// - "en"
    fn locale(&self) -> String;

    /// 序号列标题（None 表示按语言翻译）
    fn serial_column_label(&self) -> Option<String>;

    /// 命名规则绑定字段的标识前缀（None 表示按语言翻译）
    ///
    /// # 默认值
    /// - "ID"
    fn identifier_marker(&self) -> Option<String>;

    /// 解析文件时跳过完全空白的行
    ///
    /// # 默认值
    /// - true
    fn skip_blank_rows(&self) -> bool;

    /// 表头匹配是否区分大小写
    ///
    /// # 默认值
    /// - false
    fn header_match_case_sensitive(&self) -> bool;
}
