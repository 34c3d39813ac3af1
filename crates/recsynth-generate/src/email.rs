use rand::{Rng, RngCore};
use tracing::debug;

/// Separators placed between given name and surname.
pub const NAME_DIVIDERS: [&str; 3] = [".", "_", ""];
pub const PROBABILITY_OF_FIRST_INITIAL_ONLY: f64 = 0.25;

/// Build an address such as `jane.doe@domain`, `j_doe@domain` or
/// `janedoe@domain`.
///
/// The divider is picked uniformly; a quarter of the time only the first
/// letter of the given name is used. The local part is lower-cased.
pub fn synthesize_email(
    given_name: &str,
    surname: &str,
    domain: &str,
    rng: &mut dyn RngCore,
) -> String {
    let divider = NAME_DIVIDERS[rng.random_range(0..NAME_DIVIDERS.len())];

    let given_name_used = if rng.random_bool(PROBABILITY_OF_FIRST_INITIAL_ONLY) {
        given_name
            .chars()
            .next()
            .map(String::from)
            .unwrap_or_default()
    } else {
        given_name.to_string()
    };

    let address = format!(
        "{}{}{}@{}",
        given_name_used.to_lowercase(),
        divider,
        surname.to_lowercase(),
        domain
    );
    debug!(given_name, surname, address = %address, "synthesized email address");
    address
}
