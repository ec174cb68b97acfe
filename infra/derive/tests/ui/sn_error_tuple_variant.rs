use sn_derive::sn_error;

#[sn_error]
pub enum ReadError {
    Io(std::io::Error),
}

fn main() {}
