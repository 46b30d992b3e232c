use clap::error::ErrorKind;
use clap::Parser;
use huff_codec_core::codec::encoder::Encoder;
use huff_codec_core::codec::CodecError;
use huff_codec_core::codes::CodeTable;
use huff_codec_core::freq::FrequencyTable;
use huff_codec_core::tree::HuffmanTree;
use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};
use std::process::ExitCode;

/// Command line argument parser
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct MyArgs {
    /// Input file path; the container is written to `<INPUT>.huff`
    pub(crate) input: String,
}

fn main() -> ExitCode {
    let args: MyArgs = match MyArgs::try_parse() {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::DisplayHelp || e.kind() == ErrorKind::DisplayVersion => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(_) => {
            eprintln!("Argument Error");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => {
            eprintln!("File Error");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &MyArgs) -> Result<(), CodecError> {
    let mut input = BufReader::new(File::open(&args.input)?);

    let freq = FrequencyTable::from_reader(&mut input)?;
    // A zero-length input is a silent no-op: the output file is only
    // created once there is something to encode.
    let tree = match HuffmanTree::from_frequencies(&freq) {
        Some(tree) => tree,
        None => return Ok(()),
    };
    let codes = CodeTable::from_tree(&tree);
    input.seek(SeekFrom::Start(0))?;

    let output = BufWriter::new(File::create(format!("{}.huff", args.input))?);
    let mut encoder = Encoder::new(output)?;
    encoder.encode_tree(&tree)?;
    encoder.encode_payload(&mut input, &codes)?;
    let mut output = encoder.close_writer()?;
    output.flush()?;
    Ok(())
}
