use crate::bio::sequence::FastaRecord;
use crate::error::{Result, SeqseekError};
use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{line_ending, not_line_ending, space1},
    combinator::opt,
    sequence::preceded,
    IResult,
};

/// Parse a FASTA header line
fn parse_header(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    let (input, _) = tag(">")(input)?;
    let (input, id) = take_till(|c: char| c.is_whitespace())(input)?;
    let (input, description) = opt(preceded(space1, not_line_ending))(input)?;
    let (input, _) = opt(line_ending)(input)?;
    Ok((input, (id, description)))
}

/// Parse residue lines until the next header or EOF
fn parse_residues(input: &str) -> IResult<&str, String> {
    let mut residues = String::new();
    let mut remaining = input;

    while !remaining.is_empty() && !remaining.starts_with('>') {
        let (rest, line) =
            take_till::<_, _, nom::error::Error<_>>(|c: char| c == '\n' || c == '\r')(remaining)?;
        let (rest, _) = opt(line_ending)(rest)?;

        residues.extend(line.chars().filter(|c| !c.is_whitespace()));

        // A bare '\r' is not a line ending for nom; step over it.
        remaining = if rest.len() == remaining.len() {
            &rest[1..]
        } else {
            rest
        };
    }

    Ok((remaining, residues))
}

/// Parse FASTA text as returned by efetch (`rettype=fasta`)
pub fn parse_fasta(text: &str) -> Result<Vec<FastaRecord>> {
    let mut records = Vec::new();
    let mut remaining = text.trim_start();

    while !remaining.is_empty() {
        if !remaining.starts_with('>') {
            return Err(SeqseekError::Parse(
                "FASTA text must start with a '>' header".to_string(),
            ));
        }

        let (rest, (id, description)) = parse_header(remaining)
            .map_err(|_| SeqseekError::Parse("Failed to parse FASTA header".to_string()))?;

        let (rest, residues) = parse_residues(rest)
            .map_err(|_| SeqseekError::Parse("Failed to parse FASTA sequence".to_string()))?;

        let mut record = FastaRecord::new(id.to_string(), residues);
        if let Some(desc) = description.map(str::trim).filter(|d| !d.is_empty()) {
            record = record.with_description(desc.to_string());
        }
        records.push(record);

        remaining = rest.trim_start();
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let input = ">NM_000546.6 Homo sapiens tumor protein p53\nACGT";
        let (remaining, (id, desc)) = parse_header(input).unwrap();
        assert_eq!(id, "NM_000546.6");
        assert_eq!(desc, Some("Homo sapiens tumor protein p53"));
        assert_eq!(remaining, "ACGT");
    }

    #[test]
    fn test_parse_header_without_description() {
        let (remaining, (id, desc)) = parse_header(">XM_1\r\nAC").unwrap();
        assert_eq!(id, "XM_1");
        assert_eq!(desc, None);
        assert_eq!(remaining, "AC");
    }

    #[test]
    fn test_parse_multiple_records() {
        let text = ">A1.1 first\nACGT\nTTGA\n\n>B2.1 second\r\nGGCC\n";
        let records = parse_fasta(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].accession, "A1.1");
        assert_eq!(records[0].residues, "ACGTTTGA");
        assert_eq!(records[1].description.as_deref(), Some("second"));
        assert_eq!(records[1].residues, "GGCC");
    }

    #[test]
    fn test_parse_empty_and_garbage() {
        assert!(parse_fasta("").unwrap().is_empty());
        assert!(parse_fasta("\n\n").unwrap().is_empty());
        assert!(matches!(
            parse_fasta("Error: id list is empty"),
            Err(SeqseekError::Parse(_))
        ));
    }
}
