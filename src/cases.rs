use std::fs;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::ErrorKind;
use std::io::Write;
use std::path::Path;

use log::debug;

use crate::error::NetworkError;
use crate::network::NetworkItem;

const PIXEL_SCALE: f64 = 256.0;

/// Ordered test cases: inputs and, for training, the expected outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseSet<T> {
    inputs: Vec<Vec<T>>,
    expected: Option<Vec<Vec<T>>>,
}

impl<T> CaseSet<T>
where
    T: NetworkItem,
{
    /// Cases for running only.
    pub fn new(inputs: Vec<Vec<T>>) -> Self {
        Self {
            inputs,
            expected: None,
        }
    }

    /// Cases for training. Panics if both lists differ in length.
    pub fn with_expected(inputs: Vec<Vec<T>>, expected: Vec<Vec<T>>) -> Self {
        if inputs.len() != expected.len() {
            panic!(
                "Case mismatch, {} inputs but {} expected outputs.",
                inputs.len(),
                expected.len()
            );
        }

        Self {
            inputs,
            expected: Some(expected),
        }
    }

    /// Reads `count` cases for a network with layer widths `arch`.
    ///
    /// The expected outputs are read from `output_path` when given.
    pub fn load(
        input_path: &Path,
        output_path: Option<&Path>,
        arch: &[usize],
        count: usize,
    ) -> Result<Self, NetworkError> {
        let inputs = read_file(input_path, arch[0], count)?;
        let expected = match output_path {
            Some(path) => Some(read_file(path, arch[arch.len() - 1], count)?),
            None => None,
        };

        debug!("loaded {count} cases from {}", input_path.display());

        Ok(Self { inputs, expected })
    }

    /// Builds cases from processed image files, one case per file.
    ///
    /// Every file must hold exactly `arch[0]` pixel bytes.
    pub fn from_images<P: AsRef<Path>>(paths: &[P], arch: &[usize]) -> Result<Self, NetworkError> {
        if paths.is_empty() {
            return Err(NetworkError::InvalidCaseCount);
        }

        let inputs = paths
            .iter()
            .map(|path| read_image(path.as_ref(), arch[0]))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("loaded {} image cases", inputs.len());

        Ok(Self::new(inputs))
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn inputs(&self) -> &[Vec<T>] {
        &self.inputs
    }

    pub fn expected(&self) -> Option<&[Vec<T>]> {
        self.expected.as_deref()
    }
}

fn read_file<T: NetworkItem>(path: &Path, width: usize, count: usize) -> Result<Vec<Vec<T>>, NetworkError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(NetworkError::CaseFileMissing(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    read_rows(BufReader::new(file), width, count, &path.display().to_string())
}

fn read_image<T: NetworkItem>(path: &Path, width: usize) -> Result<Vec<T>, NetworkError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(NetworkError::CaseFileMissing(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    if bytes.len() != width {
        return Err(NetworkError::MalformedCase {
            file: path.display().to_string(),
            line: 1,
            reason: format!("expected {width} pixels, found {}", bytes.len()),
        });
    }

    image_row(&bytes)
}

/// Scales 8-bit pixels to `[0, 1)` by dividing each by 256.
pub fn image_row<T: NetworkItem>(pixels: &[u8]) -> Result<Vec<T>, NetworkError> {
    pixels
        .iter()
        .map(|&pixel| {
            let value = f64::from(pixel) / PIXEL_SCALE;
            T::from(value).ok_or(NetworkError::NumericConversion(value))
        })
        .collect()
}

/// Writes one line of space-separated values per row, the layout
/// [`read_rows`] reads back.
pub fn write_rows<T, W>(writer: &mut W, rows: &[Vec<T>]) -> Result<(), NetworkError>
where
    T: NetworkItem,
    W: Write,
{
    for row in rows {
        let line: Vec<String> = row.iter().map(|value| value.to_string()).collect();
        writeln!(writer, "{}", line.join(" "))?;
    }

    Ok(())
}

/// Reads `count` lines of at least `width` whitespace-separated reals.
///
/// Tokens past `width` and lines past `count` are ignored. `source` names
/// the reader in error messages.
pub fn read_rows<T, R>(reader: R, width: usize, count: usize, source: &str) -> Result<Vec<Vec<T>>, NetworkError>
where
    T: NetworkItem,
    R: BufRead,
{
    if count == 0 {
        return Err(NetworkError::InvalidCaseCount);
    }

    let mut rows = Vec::with_capacity(count);

    for (index, line) in reader.lines().take(count).enumerate() {
        let line = line?;
        let malformed = |reason: String| NetworkError::MalformedCase {
            file: source.to_string(),
            line: index + 1,
            reason,
        };

        let mut row = Vec::with_capacity(width);
        for token in line.split_whitespace().take(width) {
            let value: f64 = token
                .parse()
                .ok()
                .filter(|value: &f64| value.is_finite())
                .ok_or_else(|| malformed(format!("`{token}` is not a finite number")))?;
            row.push(T::from(value).ok_or(NetworkError::NumericConversion(value))?);
        }

        if row.len() < width {
            return Err(malformed(format!("expected {width} values, found {}", row.len())));
        }

        rows.push(row);
    }

    if rows.len() < count {
        return Err(NetworkError::TooFewCases {
            file: source.to_string(),
            expected: count,
            found: rows.len(),
        });
    }

    Ok(rows)
}
