//! BD-rate / BD-PSNR command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgMatches, Args};
use rd_tools::input::{parse_float_list, parse_rate_psnr_pair};
use rd_tools::{BdMetrics, CURVE_POINTS, Curve, CurveImporter};

#[derive(Args, Debug, Default)]
pub struct BdrateArgs {
    /// List of bitrates in kbps (first = reference, second = test)
    #[arg(short = 'b', long = "bitrates", value_name = "RATE_LIST")]
    bitrates: Vec<String>,

    /// List of PSNR values (first = reference, second = test)
    #[arg(short = 'p', long = "psnr", value_name = "PSNR_LIST")]
    psnr: Vec<String>,

    /// Pair of values for the reference codec
    #[arg(long = "ref", value_name = "RATE PSNR")]
    reference: Vec<String>,

    /// Pair of values for the codec under test
    #[arg(long = "tst", value_name = "RATE PSNR")]
    test: Vec<String>,

    /// CSV file holding the reference curve
    #[arg(long, conflicts_with = "reference")]
    ref_csv: Option<PathBuf>,

    /// CSV file holding the test curve
    #[arg(long, conflicts_with = "test")]
    tst_csv: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

/// One value option, in the order it appeared on the command line.
#[derive(Debug, Clone, PartialEq)]
enum ValueOption {
    Bitrates(String),
    Psnr(String),
    Ref(String),
    Tst(String),
}

/// The four value vectors after all arguments have been applied.
#[derive(Debug, Default, PartialEq)]
struct Vectors {
    ref_bitrate: Vec<f64>,
    ref_psnr: Vec<f64>,
    tst_bitrate: Vec<f64>,
    tst_psnr: Vec<f64>,
}

pub fn run(args: BdrateArgs, matches: &ArgMatches) -> Result<()> {
    let v = resolve(&ordered_options(matches), &args)?;
    check_len(&v.ref_bitrate, "bitrate", "ref")?;
    check_len(&v.tst_bitrate, "bitrate", "tst")?;
    check_len(&v.ref_psnr, "PSNR", "ref")?;
    check_len(&v.tst_psnr, "PSNR", "tst")?;

    let reference = Curve::new(&v.ref_bitrate, &v.ref_psnr).context("Invalid reference curve")?;
    let test = Curve::new(&v.tst_bitrate, &v.tst_psnr).context("Invalid test curve")?;
    log::debug!("reference: {:?}", reference.points());
    log::debug!("test: {:?}", test.points());

    let metrics = BdMetrics::compute(&reference, &test)?;

    if args.json {
        println!("{}", metrics.to_json()?);
    } else {
        println!("{}", format_metrics(&metrics));
    }

    Ok(())
}

fn format_metrics(metrics: &BdMetrics) -> String {
    format!("BD-rate:{:.6} BD-PSNR:{:.6}", metrics.bd_rate, metrics.bd_psnr)
}

/// Collect the value options of all kinds, sorted by command-line position.
fn ordered_options(matches: &ArgMatches) -> Vec<ValueOption> {
    let kinds: [(&str, fn(String) -> ValueOption); 4] = [
        ("bitrates", ValueOption::Bitrates),
        ("psnr", ValueOption::Psnr),
        ("reference", ValueOption::Ref),
        ("test", ValueOption::Tst),
    ];

    let mut indexed = Vec::new();
    for (id, make) in kinds {
        if let (Some(indices), Some(values)) =
            (matches.indices_of(id), matches.get_many::<String>(id))
        {
            indexed.extend(indices.zip(values.map(|v| make(v.clone()))));
        }
    }

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, option)| option).collect()
}

fn resolve(options: &[ValueOption], args: &BdrateArgs) -> Result<Vectors> {
    let mut v = Vectors::default();

    for option in options {
        match option {
            ValueOption::Bitrates(list) => {
                let values = parse_float_list(list)?;
                if v.ref_bitrate.is_empty() {
                    v.ref_bitrate = values;
                } else if v.tst_bitrate.is_empty() {
                    v.tst_bitrate = values;
                } else {
                    bail!("too many bitrate values");
                }
            }
            ValueOption::Psnr(list) => {
                let values = parse_float_list(list)?;
                if v.ref_psnr.is_empty() {
                    v.ref_psnr = values;
                } else if v.tst_psnr.is_empty() {
                    v.tst_psnr = values;
                } else {
                    bail!("too many PSNR values");
                }
            }
            ValueOption::Ref(pair) => {
                let (rate, psnr) = parse_rate_psnr_pair(pair)?;
                v.ref_bitrate.push(rate);
                v.ref_psnr.push(psnr);
            }
            ValueOption::Tst(pair) => {
                let (rate, psnr) = parse_rate_psnr_pair(pair)?;
                v.tst_bitrate.push(rate);
                v.tst_psnr.push(psnr);
            }
        }
    }

    if let Some(path) = &args.ref_csv {
        let curve = load_curve(path)?;
        v.ref_bitrate = curve.points().iter().map(|p| p.bitrate_kbps).collect();
        v.ref_psnr = curve.psnrs().to_vec();
    }

    if let Some(path) = &args.tst_csv {
        let curve = load_curve(path)?;
        v.tst_bitrate = curve.points().iter().map(|p| p.bitrate_kbps).collect();
        v.tst_psnr = curve.psnrs().to_vec();
    }

    Ok(v)
}

fn load_curve(path: &Path) -> Result<Curve> {
    log::debug!("Loading curve from: {}", path.display());
    CurveImporter::auto_detect()
        .import(path)
        .with_context(|| format!("Failed to import curve from {}", path.display()))
}

fn check_len(values: &[f64], what: &str, which: &str) -> Result<()> {
    if values.len() != CURVE_POINTS {
        bail!(
            "expected {} {} values ({}), but {} values given",
            CURVE_POINTS,
            what,
            which,
            values.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::{Command, FromArgMatches};

    use super::*;

    fn resolve_argv(argv: &[&str]) -> Result<Vectors> {
        let cmd = BdrateArgs::augment_args(Command::new("bdrate"));
        let argv = std::iter::once("bdrate").chain(argv.iter().copied());
        let matches = cmd.try_get_matches_from(argv)?;
        let args = BdrateArgs::from_arg_matches(&matches)?;
        resolve(&ordered_options(&matches), &args)
    }

    /// `--<flag> <pair>` for every pair.
    fn pairs<'a>(flag: &'a str, values: &[&'a str]) -> Vec<&'a str> {
        values.iter().flat_map(|v| [flag, *v]).collect()
    }

    #[test]
    fn test_resolve_lists() {
        let v = resolve_argv(&[
            "-b",
            "40433.88 7622.75 2394.49 1017.62",
            "-p",
            "37.58,35.38,33.90,32.06",
            "-b",
            "40370.12;7587.00;2390.00;1017.10",
            "-p",
            "37.60,35.40,33.92,32.08",
        ])
        .unwrap();
        assert_eq!(v.ref_bitrate, vec![40433.88, 7622.75, 2394.49, 1017.62]);
        assert_eq!(v.tst_psnr, vec![37.60, 35.40, 33.92, 32.08]);
    }

    #[test]
    fn test_resolve_pairs() {
        let mut argv = pairs(
            "--ref",
            &["40433.88,37.58", "7622.75,35.38", "2394.49 33.90", "1017.62 32.06"],
        );
        argv.extend(pairs(
            "--tst",
            &["40370.12,37.60", "7587.00,35.40", "2390.00 33.92", "1017.10 32.08"],
        ));
        let v = resolve_argv(&argv).unwrap();
        assert_eq!(v.ref_bitrate, vec![40433.88, 7622.75, 2394.49, 1017.62]);
        assert_eq!(v.ref_psnr, vec![37.58, 35.38, 33.90, 32.06]);
        assert_eq!(v.tst_bitrate, vec![40370.12, 7587.00, 2390.00, 1017.10]);
    }

    #[test]
    fn test_pairs_then_lists_fill_test_curve() {
        let mut argv = pairs("--ref", &["1000,30", "2000,31", "4000,32", "8000,33"]);
        argv.extend(["-b", "900 1800 3600 7200", "-p", "30 31 32 33"]);
        let v = resolve_argv(&argv).unwrap();
        assert_eq!(v.ref_bitrate, vec![1000.0, 2000.0, 4000.0, 8000.0]);
        assert_eq!(v.ref_psnr, vec![30.0, 31.0, 32.0, 33.0]);
        assert_eq!(v.tst_bitrate, vec![900.0, 1800.0, 3600.0, 7200.0]);
        assert_eq!(v.tst_psnr, vec![30.0, 31.0, 32.0, 33.0]);
    }

    #[test]
    fn test_lists_then_pairs_extend_test_curve() {
        let mut argv = vec!["-b", "1000 2000 4000 8000", "-p", "30 31 32 33"];
        argv.extend(pairs("--tst", &["900,30", "1800,31", "3600,32", "7200,33"]));
        let v = resolve_argv(&argv).unwrap();
        assert_eq!(v.ref_bitrate, vec![1000.0, 2000.0, 4000.0, 8000.0]);
        assert_eq!(v.tst_bitrate, vec![900.0, 1800.0, 3600.0, 7200.0]);
    }

    #[test]
    fn test_too_many_lists() {
        let err = resolve_argv(&["-b", "1 2 3 4", "-b", "1 2 3 4", "-b", "1 2 3 4"]).unwrap_err();
        assert_eq!(err.to_string(), "too many bitrate values");
    }

    #[test]
    fn test_check_len_message() {
        let err = check_len(&[1.0, 2.0, 3.0], "bitrate", "tst").unwrap_err();
        assert_eq!(err.to_string(), "expected 4 bitrate values (tst), but 3 values given");
        assert!(check_len(&[1.0, 2.0, 3.0, 4.0], "PSNR", "ref").is_ok());
    }

    #[test]
    fn test_format_metrics() {
        let metrics = BdMetrics {
            bd_rate: -1.5953262440889904,
            bd_psnr: 0.02399603419344698,
        };
        assert_eq!(format_metrics(&metrics), "BD-rate:-1.595326 BD-PSNR:0.023996");
    }
}
