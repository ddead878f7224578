//! 错误消息占位符替换
//! 支持 :attribute / :countries / :examples 三个占位符

/// 参数对应的示例列表（国家代码，示例）
pub type ExampleList = Vec<(String, Option<String>)>;

/// 替换 postal_code / postal_code_with 规则消息中的占位符
///
/// - `:attribute` 替换为字段名
/// - `:countries` 替换为已识别的国家代码，逗号分隔
/// - `:examples` 替换为已知示例，逗号分隔，无示例的国家跳过
pub fn replace_postal_code(message: &str, attribute: &str, examples: &[(String, Option<String>)]) -> String {
    let countries = join_countries(examples);
    let examples = join_examples(examples);

    message
        .replace(":attribute", attribute)
        .replace(":countries", &countries)
        .replace(":examples", &examples)
}

/// 拼接国家代码
pub fn join_countries(examples: &[(String, Option<String>)]) -> String {
    examples
        .iter()
        .map(|(country, _)| country.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 拼接示例
pub fn join_examples(examples: &[(String, Option<String>)]) -> String {
    examples
        .iter()
        .filter_map(|(_, example)| example.as_deref())
        .filter(|example| !example.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
