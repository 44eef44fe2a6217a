use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "formwizard", version, about = "Schema-driven data entry in the terminal")]
pub struct Cli {
    /// Tick rate, i.e. number of ticks per second (overrides the config file)
    #[arg(short, long, value_name = "FLOAT")]
    pub tick_rate: Option<f64>,

    /// Frame rate, i.e. number of frames per second (overrides the config file)
    #[arg(short, long, value_name = "FLOAT")]
    pub frame_rate: Option<f64>,

    /// Form type to select at startup (e.g. "User Information")
    #[arg(long, value_name = "NAME")]
    pub form_type: Option<String>,

    /// Print the built-in form schemas as JSON and exit
    #[arg(long)]
    pub print_schemas: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_default_to_the_config_file() {
        let cli = Cli::try_parse_from(["formwizard"]).unwrap();
        assert!(cli.tick_rate.is_none());
        assert!(cli.frame_rate.is_none());
        assert!(cli.form_type.is_none());
        assert!(!cli.print_schemas);
    }

    #[test]
    fn form_type_accepts_names_with_spaces() {
        let cli =
            Cli::try_parse_from(["formwizard", "--form-type", "User Information"]).unwrap();
        assert_eq!(cli.form_type.as_deref(), Some("User Information"));
    }

    #[test]
    fn rates_are_parsed_as_floats() {
        let cli = Cli::try_parse_from(["formwizard", "-t", "10", "-f", "30"]).unwrap();
        assert_eq!(cli.tick_rate, Some(10.0));
        assert_eq!(cli.frame_rate, Some(30.0));
    }
}
