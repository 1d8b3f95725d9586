use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

use hkit_core::CoreError;
use hkit_core::models::{ContactPair, MAX_COUNT, PairMap, SeqDict};
use hkit_core::packing::MAX_COORD;

use crate::consts::*;
use crate::error::{PairsError, Result};

///
/// Which optional columns to write after the mandatory ones.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    pub phase: bool,
    pub count: bool,
}

// positions of optional columns announced by a `#columns:` header
#[derive(Debug, Default)]
struct OptionalColumns {
    phase: Option<[usize; 2]>,
    count: Option<usize>,
}

impl OptionalColumns {
    fn from_header(rest: &str) -> Self {
        let names: Vec<&str> = rest.split_whitespace().collect();
        let find = |name: &str| names.iter().position(|c| *c == name);
        let phase = match (find(PHASE_COLUMNS[0]), find(PHASE_COLUMNS[1])) {
            (Some(a), Some(b)) => Some([a, b]),
            _ => None,
        };
        OptionalColumns {
            phase,
            count: find(COUNT_COLUMN),
        }
    }
}

///
/// Open a `.pairs` file for reading. A `.gz` extension selects the multi-member gzip
/// decoder that bgzip'd pairs files need.
///
/// # Arguments
///
/// - path: path to the pairs file
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path)?;
    let file: Box<dyn Read> = if path.extension() == Some(OsStr::new("gz")) {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(BufReader::new(file))
}

///
/// Like [`get_dynamic_reader`], but `-` streams pairs from stdin, so the CLI can sit in
/// a pipeline.
///
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> Result<BufReader<Box<dyn Read>>> {
    if file_path_str == "-" {
        return Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>));
    }
    get_dynamic_reader(Path::new(file_path_str))
}

fn parse_err(line: usize, msg: impl Into<String>) -> PairsError {
    PairsError::Parse {
        line,
        msg: msg.into(),
    }
}

fn parse_coord(field: &str, line: usize) -> Result<u32> {
    let coord: u64 = field
        .parse()
        .map_err(|_| parse_err(line, format!("invalid position '{}'", field)))?;
    if coord > MAX_COORD as u64 {
        return Err(parse_err(
            line,
            format!("position {} exceeds the maximum of {}", coord, MAX_COORD),
        ));
    }
    Ok(coord as u32)
}

fn parse_count(field: &str, line: usize) -> Result<u32> {
    let n: u64 = field
        .parse()
        .map_err(|_| parse_err(line, format!("invalid count '{}'", field)))?;
    if n > MAX_COUNT as u64 {
        return Err(parse_err(
            line,
            format!("count {} exceeds the maximum of {}", n, MAX_COUNT),
        ));
    }
    Ok(n as u32)
}

fn parse_phase(field: &str, line: usize) -> Result<Option<u8>> {
    match field {
        MISSING => Ok(None),
        "0" => Ok(Some(0)),
        "1" => Ok(Some(1)),
        other => Err(parse_err(line, format!("invalid phase '{}'", other))),
    }
}

fn parse_record(
    fields: &[&str],
    columns: &OptionalColumns,
    dict: &mut SeqDict,
    line: usize,
) -> Result<ContactPair> {
    if fields.len() < BASE_COLUMNS.len() {
        return Err(parse_err(
            line,
            format!(
                "expected at least {} columns, found {}",
                BASE_COLUMNS.len(),
                fields.len()
            ),
        ));
    }
    let chr1 = dict.add(fields[1], 0);
    let chr2 = dict.add(fields[3], 0);
    let mut pair = ContactPair::new(
        chr1,
        parse_coord(fields[2], line)?,
        chr2,
        parse_coord(fields[4], line)?,
    );
    for k in 0..2 {
        pair.strand[k] = fields[5 + k].parse().map_err(|e| parse_err(line, e))?;
    }

    let get = |col: usize| {
        fields
            .get(col)
            .copied()
            .ok_or_else(|| parse_err(line, format!("missing column {}", col + 1)))
    };
    if let Some(cols) = columns.phase {
        pair.phase = [parse_phase(get(cols[0])?, line)?, parse_phase(get(cols[1])?, line)?];
    }
    if let Some(col) = columns.count {
        let field = get(col)?;
        pair.n = parse_count(field, line)?;
    }
    Ok(pair)
}

///
/// Read contact pairs from any buffered reader.
///
/// Header lines start with `#`. `#chromsize: <name> <len>` lines define chromosomes in
/// order; chromosomes only seen in records are appended with length 0. A `#columns:`
/// line naming `phase0`/`phase1` or `n` makes those columns be parsed.
///
pub fn read_pairs<R: BufRead>(reader: R) -> Result<PairMap> {
    let mut dict = SeqDict::new();
    let mut pairs = Vec::new();
    let mut columns = OptionalColumns::default();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = i + 1;
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix(CHROMSIZE_PREFIX) {
            let mut it = rest.split_whitespace();
            let (Some(name), Some(len)) = (it.next(), it.next()) else {
                return Err(parse_err(lineno, "incomplete #chromsize line"));
            };
            let len = len
                .parse()
                .map_err(|_| parse_err(lineno, format!("invalid chromosome length '{}'", len)))?;
            dict.add(name, len);
            continue;
        }
        if let Some(rest) = line.strip_prefix(COLUMNS_PREFIX) {
            columns = OptionalColumns::from_header(rest);
            continue;
        }
        if line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        pairs.push(parse_record(&fields, &columns, &mut dict, lineno)?);
    }

    Ok(PairMap::new(dict, pairs))
}

///
/// Read a `.pairs` or `.pairs.gz` file from disk, or stdin for `-`.
///
pub fn read_pairs_file(path: &str) -> Result<PairMap> {
    let map = read_pairs(get_dynamic_reader_w_stdin(path)?)?;
    log::info!(
        "read {} pairs on {} chromosomes from {}",
        map.len(),
        map.dict.len(),
        path
    );
    Ok(map)
}

fn chr_name(dict: &SeqDict, id: u32) -> Result<&str> {
    Ok(dict.name(id).ok_or(CoreError::UnknownChromosome(id))?)
}

///
/// Write a pairs map, header included.
///
/// # Arguments
/// - writer: where to write to
/// - map: the pairs to write
/// - opts: which optional columns to add
///
pub fn write_pairs<W: Write>(mut writer: W, map: &PairMap, opts: OutputOptions) -> Result<()> {
    writeln!(writer, "{}", PAIRS_HEADER)?;
    for (name, len) in map.dict.iter() {
        writeln!(writer, "{} {} {}", CHROMSIZE_PREFIX, name, len)?;
    }
    let mut columns: Vec<&str> = BASE_COLUMNS.to_vec();
    if opts.phase {
        columns.extend(PHASE_COLUMNS);
    }
    if opts.count {
        columns.push(COUNT_COLUMN);
    }
    writeln!(writer, "{} {}", COLUMNS_PREFIX, columns.join(" "))?;

    let phase = |p: Option<u8>| p.map_or(MISSING.to_string(), |v| v.to_string());
    for p in &map.pairs {
        write!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            MISSING,
            chr_name(&map.dict, p.chr1())?,
            p.pos1(),
            chr_name(&map.dict, p.chr2())?,
            p.pos2(),
            p.strand[0],
            p.strand[1]
        )?;
        if opts.phase {
            write!(writer, "\t{}\t{}", phase(p.phase[0]), phase(p.phase[1]))?;
        }
        if opts.count {
            write!(writer, "\t{}", p.n)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

///
/// Write a pairs map to disk, gzip'd when the path ends in `.gz`. `-` writes to stdout.
///
pub fn write_pairs_file(path: &str, map: &PairMap, opts: OutputOptions) -> Result<()> {
    if path == "-" {
        let stdout = std::io::stdout();
        return write_pairs(BufWriter::new(stdout.lock()), map, opts);
    }
    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    if path.extension() == Some(OsStr::new("gz")) {
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        write_pairs(&mut encoder, map, opts)?;
        encoder.finish()?;
    } else {
        write_pairs(BufWriter::new(file), map, opts)?;
    }
    log::info!("wrote {} pairs to {}", map.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use hkit_core::models::Strand;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn pairs_text() -> &'static str {
        "## pairs format v1.0\n\
         #chromsize: chr1 249250621\n\
         #chromsize: chr2 243199373\n\
         #columns: readID chr1 pos1 chr2 pos2 strand1 strand2 phase0 phase1\n\
         r1\tchr1\t1000\tchr1\t5000\t+\t-\t0\t.\n\
         r2\tchr1\t1200\tchr2\t300\t-\t+\t.\t1\n\
         r3\tchr3\t10\tchr3\t20\t+\t+\t.\t.\n"
    }

    #[rstest]
    fn test_read_pairs(pairs_text: &str) {
        let map = read_pairs(pairs_text.as_bytes()).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.dict.len(), 3);
        assert_eq!(map.dict.get("chr3"), Some(2));
        assert_eq!(map.dict.chrom_len(2), Some(0));

        let p = &map.pairs[1];
        assert_eq!((p.chr1(), p.pos1(), p.chr2(), p.pos2()), (0, 1200, 1, 300));
        assert_eq!(p.strand, [Strand::Reverse, Strand::Forward]);
        assert_eq!(p.phase, [None, Some(1)]);
        assert_eq!(map.pairs[0].phase, [Some(0), None]);
    }

    #[rstest]
    fn test_read_without_optional_columns() {
        let text = ". chrA 5 chrA 9 + + extra\n";
        let map = read_pairs(text.as_bytes()).unwrap();
        assert_eq!(map.pairs[0].phase, [None, None]);
        assert_eq!(map.pairs[0].pos2(), 9);
    }

    #[rstest]
    #[case("r1\tchr1\t100\tchr1\n", 1)]
    #[case("r1\tchr1\tabc\tchr1\t5\t+\t+\n", 1)]
    #[case("#x\nr1\tchr1\t1\tchr1\t5\t*\t+\n", 2)]
    #[case("r1\tchr1\t4294967295\tchr1\t5\t+\t+\n", 1)]
    #[case("#columns: readID chr1 pos1 chr2 pos2 strand1 strand2 phase0 phase1\nr1\tchr1\t1\tchr1\t5\t+\t+\t2\t0\n", 2)]
    #[case("#chromsize: chr1\n", 1)]
    #[case("#columns: readID chr1 pos1 chr2 pos2 strand1 strand2 n\nr1\tchr1\t1\tchr2\t5\t+\t+\t4294967295\n", 2)]
    #[case("#columns: readID chr1 pos1 chr2 pos2 strand1 strand2 n\nr1\tchr1\t1\tchr2\t5\t+\t+\t2147483648\n", 2)]
    fn test_malformed_lines(#[case] text: &str, #[case] bad_line: usize) {
        match read_pairs(text.as_bytes()) {
            Err(PairsError::Parse { line, .. }) => assert_eq!(line, bad_line),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[rstest]
    fn test_count_column_accepts_max_count() {
        let text = "#columns: readID chr1 pos1 chr2 pos2 strand1 strand2 n\n\
                    r1\tchr1\t1\tchr2\t5\t+\t+\t2147483647\n";
        let map = read_pairs(text.as_bytes()).unwrap();
        assert_eq!(map.pairs[0].n, MAX_COUNT);
    }

    #[rstest]
    fn test_write_then_read_keeps_counts(pairs_text: &str) {
        let mut map = read_pairs(pairs_text.as_bytes()).unwrap();
        for (i, p) in map.pairs.iter_mut().enumerate() {
            p.n = 10 + i as u32;
        }
        let opts = OutputOptions {
            phase: true,
            count: true,
        };

        let mut buf = Vec::new();
        write_pairs(&mut buf, &map, opts).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(PAIRS_HEADER));
        assert!(text.contains("#columns: readID chr1 pos1 chr2 pos2 strand1 strand2 phase0 phase1 n"));
        assert!(text.contains(".\tchr1\t1200\tchr2\t300\t-\t+\t.\t1\t11"));

        let again = read_pairs(text.as_bytes()).unwrap();
        assert_eq!(again.pairs, map.pairs);
    }

    #[rstest]
    fn test_gz_file_round_trip(pairs_text: &str) {
        let map = read_pairs(pairs_text.as_bytes()).unwrap();
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("nested").join("out.pairs.gz");
        let path = path.to_str().unwrap();

        write_pairs_file(path, &map, OutputOptions::default()).unwrap();
        let again = read_pairs_file(path).unwrap();
        assert_eq!(again.len(), map.len());
        assert_eq!(again.dict.name(1), Some("chr2"));
        assert_eq!(again.pairs[0].pos, map.pairs[0].pos);
    }

    #[rstest]
    fn test_unknown_chromosome_on_write() {
        let map = PairMap::new(SeqDict::new(), vec![ContactPair::new(4, 1, 4, 2)]);
        let err = write_pairs(Vec::new(), &map, OutputOptions::default()).unwrap_err();
        assert!(matches!(err, PairsError::Core(CoreError::UnknownChromosome(4))));
    }
}
