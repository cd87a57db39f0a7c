use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Workspace files larger than this are refused rather than loaded.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    read_file_with_limit(path, MAX_FILE_SIZE)
}

pub fn check_file_size_with_limit(file: &File, max_size: u64) -> io::Result<u64> {
    let len = file.metadata()?.len();

    if len > max_size {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("file is too large ({} bytes, max {} bytes)", len, max_size),
        ));
    }

    Ok(len)
}

pub fn read_file_with_limit(path: &Path, max_size: u64) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let len = check_file_size_with_limit(&file, max_size)?;

    let mut contents = Vec::with_capacity(len as usize);
    file.read_to_end(&mut contents)?;

    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_file_success() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Bundle-Version: 1.0.0.qualifier").unwrap();

        let content = read_file(file.path()).unwrap();
        assert!(String::from_utf8(content).unwrap().contains("qualifier"));
    }

    #[test]
    fn test_read_file_too_large() {
        let mut file = NamedTempFile::new().unwrap();
        let large_content = "x".repeat(1024);
        file.write_all(large_content.as_bytes()).unwrap();

        let result = read_file_with_limit(file.path(), 100);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too large"));
    }

    #[test]
    fn test_read_file_not_found() {
        let result = read_file(Path::new("/nonexistent/path/MANIFEST.MF"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
