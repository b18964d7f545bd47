//! Binary weight store.
//!
//! Layout, little endian: the `num_layers + 1` layer widths as `i32`, then
//! every weight as `f64`, layer by layer, row by row (source node, then
//! destination node).

use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use byteorder::LittleEndian;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use log::info;

use crate::activation::Activation;
use crate::error::NetworkError;
use crate::network::Network;
use crate::network::NetworkItem;

/// Writes the network's weights to `path`, replacing any existing file.
pub fn save<T, U>(network: &Network<T, U>, path: &Path) -> Result<(), NetworkError>
where
    T: NetworkItem,
    U: Activation<T>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    write(network, &mut writer)?;
    writer.flush()?;

    info!("saved weights to {}", path.display());
    Ok(())
}

pub fn write<T, U, W>(network: &Network<T, U>, writer: &mut W) -> Result<(), NetworkError>
where
    T: NetworkItem,
    U: Activation<T>,
    W: Write,
{
    for &size in network.arch() {
        let size = i32::try_from(size)
            .map_err(|_| NetworkError::InvalidTopology(format!("layer width {size} does not fit the weight file")))?;
        writer.write_i32::<LittleEndian>(size)?;
    }

    for matrix in network.weights() {
        for &weight in matrix.items.iter() {
            let value = weight.to_f64().unwrap_or(f64::NAN);
            writer.write_f64::<LittleEndian>(value)?;
        }
    }

    Ok(())
}

/// Loads weights from `path` into the network.
///
/// Nothing is written to the network unless the header matches its
/// topology and every weight could be read.
pub fn load<T, U>(network: &mut Network<T, U>, path: &Path) -> Result<(), NetworkError>
where
    T: NetworkItem,
    U: Activation<T>,
{
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(NetworkError::WeightFileMissing(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    read(network, &mut BufReader::new(file))?;

    info!("loaded weights from {}", path.display());
    Ok(())
}

pub fn read<T, U, R>(network: &mut Network<T, U>, reader: &mut R) -> Result<(), NetworkError>
where
    T: NetworkItem,
    U: Activation<T>,
    R: Read,
{
    let header = (0..network.arch().len())
        .map(|_| reader.read_i32::<LittleEndian>())
        .collect::<Result<Vec<_>, _>>()?;

    let matches = header
        .iter()
        .zip(network.arch())
        .all(|(&found, &expected)| usize::try_from(found) == Ok(expected));

    if !matches {
        return Err(NetworkError::WeightTopologyMismatch {
            expected: network.arch().to_vec(),
            found: header,
        });
    }

    let mut staged = Vec::with_capacity(network.num_layers());
    for matrix in network.weights() {
        let mut items = Vec::with_capacity(matrix.items.len());
        for _ in 0..matrix.items.len() {
            let value = reader.read_f64::<LittleEndian>()?;
            items.push(T::from(value).ok_or(NetworkError::NumericConversion(value))?);
        }
        staged.push(items);
    }

    for (layer, items) in staged.iter().enumerate() {
        network.layer_weights_mut(layer).set_items(items);
    }

    Ok(())
}
