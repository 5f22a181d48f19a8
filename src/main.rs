use std::fs;

use clap::{Arg, ArgAction, Command};
use versioned_i18n::{
    FixedLocale, I18nConfig, Resolver, TranslationStore, VerbosityLevel, VersionedText,
};

/// Small built-in table used by the CLI
fn demo_store(default_locale: &str) -> Result<TranslationStore, Box<dyn std::error::Error>> {
    let mut store = TranslationStore::new(default_locale);
    let default_locale = store.default_locale().to_string();

    store.add(&default_locale, "Hello", "Hello")?;
    store.add("pt", "Hello", "Olá")?;
    store.add("pt_br", "Hello", "Oi")?;
    store.add("de_at", "Hello", "Servus")?;
    store.add("es", "Hello", "Hola")?;

    let english = VersionedText::new("You have %d messages")
        .zero("You have no messages")
        .one("You have one message")
        .many("You have %d messages");
    let portuguese = VersionedText::new("Você tem %d mensagens")
        .zero("Você não tem mensagens")
        .one("Você tem uma mensagem");
    let polish = VersionedText::new("Masz %d wiadomości")
        .one("Masz jedną wiadomość")
        .two_three_four("Masz %d wiadomości");
    store.add(&default_locale, "You have %d messages", &english.encode())?;
    store.add("pt", "You have %d messages", &portuguese.encode())?;
    store.add("pl", "You have %d messages", &polish.encode())?;

    let greeting = VersionedText::new("Welcome")
        .modifier("formal", "Welcome, dear guest")
        .modifier("casual", "Hey there");
    store.add(&default_locale, "Welcome", &greeting.encode())?;

    Ok(store)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("versioned-i18n")
        .version("0.1.0")
        .about("Resolve a translation key against the built-in demo table")
        .arg(
            Arg::new("key")
                .help("Translation key (the text in the default locale)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("locale")
                .long("locale")
                .short('l')
                .help("Requested locale (e.g. pt_br, de-AT)"),
        )
        .arg(
            Arg::new("current")
                .long("current")
                .short('c')
                .help("Locale reported by the current-locale provider"),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .short('n')
                .help("Pick the plural variant for this count")
                .value_parser(clap::value_parser!(i64))
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("modifier")
                .long("modifier")
                .short('m')
                .help("Pick the variant with this modifier label"),
        )
        .arg(
            Arg::new("all")
                .long("all")
                .short('a')
                .help("Print every variant of the text")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("JSON configuration file"),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .short('r')
                .help("Print recorded missing keys and translations as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log fallback resolution in detail")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => I18nConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => I18nConfig::default(),
    };
    if matches.get_flag("verbose") {
        config.verbosity = VerbosityLevel::Verbose;
    }

    let store = demo_store(&config.default_locale)?;
    let mut resolver = Resolver::from_config(&config);
    if let Some(current) = matches.get_one::<String>("current") {
        resolver.with_provider(FixedLocale(current.clone()));
    }

    let key = matches
        .get_one::<String>("key")
        .map(String::as_str)
        .unwrap_or_default();
    let locale = matches.get_one::<String>("locale").map(String::as_str);

    if matches.get_flag("all") {
        for (label, text) in resolver.resolve_all_versions(&store, key, locale)? {
            println!("{}: {}", label.as_deref().unwrap_or("(base)"), text);
        }
    } else if let Some(count) = matches.get_one::<i64>("count") {
        println!("{}", resolver.resolve_plural(&store, key, *count, locale)?);
    } else if let Some(modifier) = matches.get_one::<String>("modifier") {
        println!("{}", resolver.resolve_version(&store, key, modifier, locale)?);
    } else {
        println!("{}", resolver.resolve(&store, key, locale)?);
    }

    if matches.get_flag("report") {
        println!(
            "{}",
            serde_json::to_string_pretty(&resolver.diagnostics().report())?
        );
    }

    Ok(())
}
