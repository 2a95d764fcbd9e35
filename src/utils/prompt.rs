use std::io::{self, BufRead, Write};

/// 打印提示并读取一行输入（去掉行尾换行）
///
/// 输入流结束时返回 `UnexpectedEof`。
pub fn prompt_line<R, W>(input: &mut R, output: &mut W, message: &str) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "输入已结束"));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
