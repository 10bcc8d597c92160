use snafu::{Location, Snafu};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("IO error"))]
    Io {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("CSV error"))]
    Csv {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: csv::Error,
    },
    #[snafu(display("Invalid airport record on line {line}"))]
    InvalidRecord {
        #[snafu(implicit)]
        location: Location,
        line: u64,
    },
}

impl From<csv::Error> for Error {
    #[track_caller]
    fn from(e: csv::Error) -> Self {
        let location = std::panic::Location::caller();
        let location = Location::new(location.file(), location.line(), location.column());
        match e.kind() {
            csv::ErrorKind::Deserialize { pos: Some(pos), .. } => Error::InvalidRecord {
                line: pos.line(),
                location,
            },
            _ => Error::Csv { location, error: e },
        }
    }
}
