use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::rgf::RgfTable;

/// Write an RGF completion table to a file.
///
/// Layout: `rows` and `cols` as native-endian `i64`, then every entry in row
/// order as a GMP raw integer (big-endian `i32` byte count, then the
/// big-endian magnitude).
pub fn write_table_file<P: AsRef<Path>>(path: P, table: &RgfTable) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    let rows = table.rows();
    let cols = rows.first().map_or(0, Vec::len);
    file.write_all(&to_i64(rows.len())?.to_ne_bytes())?;
    file.write_all(&to_i64(cols)?.to_ne_bytes())?;

    for entry in rows.iter().flatten() {
        write_entry(&mut file, entry)?;
    }

    file.flush()
}

/// Read an RGF completion table written by [`write_table_file`].
pub fn read_table_file<P: AsRef<Path>>(path: P) -> io::Result<RgfTable> {
    let mut file = BufReader::new(File::open(path)?);

    let mut buf8 = [0u8; 8];
    file.read_exact(&mut buf8)?;
    let rows = from_i64(i64::from_ne_bytes(buf8))?;
    file.read_exact(&mut buf8)?;
    let cols = from_i64(i64::from_ne_bytes(buf8))?;

    if rows == 0 || cols < 2 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "table needs at least one row and two columns",
        ));
    }

    // Dimensions come from the file, so nothing is preallocated from them.
    let mut table = Vec::new();
    for _ in 0..rows {
        let row = (0..cols)
            .map(|_| read_entry(&mut file))
            .collect::<io::Result<Vec<_>>>()?;
        table.push(row);
    }

    RgfTable::from_rows(table).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

fn write_entry<W: Write>(out: &mut W, value: &BigUint) -> io::Result<()> {
    if value.is_zero() {
        return out.write_all(&0i32.to_be_bytes());
    }
    let bytes = value.to_bytes_be();
    let size = i32::try_from(bytes.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "table entry too large"))?;
    out.write_all(&size.to_be_bytes())?;
    out.write_all(&bytes)
}

fn read_entry<R: Read>(input: &mut R) -> io::Result<BigUint> {
    let mut buf4 = [0u8; 4];
    input.read_exact(&mut buf4)?;
    let size = i32::from_be_bytes(buf4);
    if size < 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "negative table entry",
        ));
    }
    let mut bytes = Vec::new();
    input.by_ref().take(size as u64).read_to_end(&mut bytes)?;
    if bytes.len() != size as usize {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "truncated table entry",
        ));
    }
    Ok(BigUint::from_bytes_be(&bytes))
}

fn to_i64(value: usize) -> io::Result<i64> {
    i64::try_from(value)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "table dimension too large"))
}

fn from_i64(value: i64) -> io::Result<usize> {
    usize::try_from(value)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "invalid table dimension"))
}
