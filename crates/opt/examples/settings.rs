//! Resolving service settings from optional sources.

use std::collections::HashMap;

use opt::{sequence, Opt, OptVisitor};

struct Describe;

impl OptVisitor<u16> for Describe {
    type Value = String;
    fn visit_some(self, port: u16) -> String { format!("listening on {port}") }
    fn visit_none(self) -> String { "no port configured".into() }
}

fn lookup(env: &HashMap<&'static str, &'static str>, key: &str) -> Opt<&'static str> {
    Opt::of_nullable(env.get(key).copied())
}

fn main() -> anyhow::Result<()> {
    let env = HashMap::from([("HOST", "0.0.0.0"), ("PORT", "8080"), ("WORKERS", "x")]);

    let port = lookup(&env, "PORT").map_nullable(|s| s.parse::<u16>().ok());
    println!("{}", port.accept(Describe));

    let workers = lookup(&env, "WORKERS")
        .map_nullable(|s| s.parse::<usize>().ok())
        .get_or_else(|| 4);
    println!("workers: {workers}");

    let host = lookup(&env, "HOST").get_or_throw(|| anyhow::anyhow!("HOST is required"))?;
    println!("host: {host}");

    // Computed only if something looks at it.
    let banner = Opt::lazy_of(move || format!("{host}:{}", 8080));
    println!("banner: {banner:?}");
    println!("banner: {banner}");

    let both = sequence([lookup(&env, "HOST"), lookup(&env, "PORT")]);
    println!("host+port: {both:?}");
    Ok(())
}
