use colored::*;

use crate::terminal::print;

const BANNER: &str = r#"
     ___ _           _      _           _
    | __| |___ ___ _| |_ __| |__ _ _____| |_
    | _|| / -_) -_)  _/ _` / _` (_-<  _| ' \
    |_| |_\___\___|\__\__,_\__,_/__/\__|_||_|
"#;

pub fn print() {
    print::print(&format!("{}", BANNER.bright_green()));
}
