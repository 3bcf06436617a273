use clap::{value_parser, Arg, ArgAction, Command};

fn isbn_arg() -> Arg {
    Arg::new("isbn")
        .help("ISBN-10 or ISBN-13, hyphens allowed")
        .required(true)
}

pub fn arg_parser() -> Command {
    Command::new("bookmeta")
        .about("Book metadata from Open Library")
        .subcommand_required(true)
        .subcommand(
            Command::new("lookup")
                .about("Look up a book and print what was found")
                .arg(isbn_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the record as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("add")
                .about("Look up a book and save it")
                .arg(isbn_arg()),
        )
        .subcommand(
            Command::new("show").about("Show a saved book").arg(
                Arg::new("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
        .subcommand(Command::new("list").about("Show all saved books"))
        .subcommand(Command::new("serve").about("Answer ISBN lookups over HTTP"))
        .subcommand(Command::new("config").about("Print the default configuration"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_command() {
        arg_parser().debug_assert();
    }

    #[test]
    fn lookup_takes_isbn_and_json_flag() {
        let matches = arg_parser()
            .try_get_matches_from(["bookmeta", "lookup", "978-0-552-12475-1", "--json"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "lookup");
        assert_eq!(sub.get_one::<String>("isbn").unwrap(), "978-0-552-12475-1");
        assert!(sub.get_flag("json"));
    }

    #[test]
    fn show_requires_numeric_id() {
        assert!(arg_parser()
            .try_get_matches_from(["bookmeta", "show", "seven"])
            .is_err());
    }
}
