use super::*;

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["skudb-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli = Cli::try_parse_from(["skudb-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["skudb-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_import_with_required_flags() {
    let cli = Cli::try_parse_from([
        "skudb-cli",
        "import",
        "--file",
        "data/leonisa.csv",
        "--catalog",
        "leonisa",
        "--campaign",
        "172025",
    ])
    .unwrap();

    if let Some(Commands::Import {
        ref file,
        ref catalog,
        ref campaign,
        ref description,
        report,
    }) = cli.command
    {
        assert_eq!(file, &PathBuf::from("data/leonisa.csv"));
        assert_eq!(catalog, "leonisa");
        assert_eq!(campaign, "172025");
        assert!(description.is_none());
        assert!(!report);
    } else {
        panic!("unexpected command variant");
    }
}

#[test]
fn parses_import_with_description_and_report() {
    let cli = Cli::try_parse_from([
        "skudb-cli",
        "import",
        "--file",
        "c.csv",
        "--catalog",
        "leonisa",
        "--campaign",
        "172025",
        "--description",
        "Campaign 17",
        "--report",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Import {
            description: Some(ref d),
            report: true,
            ..
        }) if d == "Campaign 17"
    ));
}

#[test]
fn import_requires_campaign() {
    let result = Cli::try_parse_from([
        "skudb-cli",
        "import",
        "--file",
        "c.csv",
        "--catalog",
        "leonisa",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_lookup_with_multiple_skus() {
    let cli = Cli::try_parse_from(["skudb-cli", "lookup", "19976", "009241", "abc"]).unwrap();
    if let Some(Commands::Lookup { ref skus, report }) = cli.command {
        assert_eq!(skus, &["19976", "009241", "abc"]);
        assert!(!report);
    } else {
        panic!("unexpected command variant");
    }
}

#[test]
fn lookup_requires_at_least_one_sku() {
    assert!(Cli::try_parse_from(["skudb-cli", "lookup"]).is_err());
}

#[test]
fn parses_lookup_report_flag() {
    let cli = Cli::try_parse_from(["skudb-cli", "lookup", "--report", "19976"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Lookup { report: true, .. })
    ));
}

#[test]
fn parses_catalogs_list() {
    let cli = Cli::try_parse_from(["skudb-cli", "catalogs", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Catalogs {
            command: CatalogsCommands::List
        })
    ));
}

#[test]
fn parses_catalogs_products() {
    let cli = Cli::try_parse_from([
        "skudb-cli",
        "catalogs",
        "products",
        "--catalog",
        "leonisa",
        "--campaign",
        "172025",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Catalogs {
            command: CatalogsCommands::Products {
                ref catalog,
                ref campaign,
            }
        }) if catalog == "leonisa" && campaign == "172025"
    ));
}
