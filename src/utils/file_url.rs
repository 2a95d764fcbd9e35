//! 本地文件地址
//!
//! 调试 HTML 和识别码图片都按 `file://` 地址交给浏览器，路径中的 `#`、`%`、空格等字符必须逐段编码。

use std::path::Path;

use url::Url;

/// 绝对路径转换为 `file://` 地址，相对路径返回 `None`
pub fn file_url(path: &Path) -> Option<Url> {
    Url::from_file_path(path).ok()
}

/// 写入 HTML 属性值的地址文本
pub fn file_url_attr(path: &Path) -> Option<String> {
    file_url(path).map(|url| url.as_str().replace('&', "&amp;"))
}
