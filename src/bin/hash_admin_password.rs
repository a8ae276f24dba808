// Utility to generate the `admin.password_hash` configuration value

use std::{env, process};

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHasher, Version};
use fake::faker::internet::en::Password;
use fake::Fake;

/// Return PHC string for the provided password and a random salt
fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let params = Params::new(15000, 2, 1, None).map_err(|e| anyhow::anyhow!(e))?;
    let hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(hash.to_string())
}

/// Print the password hash to store in the configuration
fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.iter().skip(1).any(|arg| arg.starts_with('-')) {
        usage(&args[0]);
    }

    // Hash the provided password, or a random one when none is given
    let password = match args.len() {
        1 => {
            let password: String = Password(32..33).fake();
            println!("Generated password: {password}");
            password
        }
        2 => args[1].clone(),
        _ => usage(&args[0]),
    };
    println!("password_hash: \"{}\"", hash_password(&password)?);

    Ok(())
}

/// Print usage information and exit
fn usage(prog: &str) -> ! {
    println!("Usage:");
    println!("{prog} [password]");
    println!("\nExamples:");
    println!("{prog}");
    println!("{prog} everythinghastostartsomewhere");

    process::exit(1);
}
