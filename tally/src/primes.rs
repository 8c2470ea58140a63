/// Print the primes up to `limit`, one per line
pub fn execute(limit: usize) {
    for prime in primes_up_to(limit) {
        println!("{prime}");
    }
}

/// Primes up to and including `limit`, by sieve of Eratosthenes
fn primes_up_to(limit: usize) -> Vec<usize> {
    if limit < 2 {
        return Vec::new();
    }

    let mut composite = vec![false; limit + 1];
    let mut primes = Vec::new();

    for candidate in 2..=limit {
        if composite[candidate] {
            continue;
        }
        primes.push(candidate);

        if let Some(first) = candidate.checked_mul(candidate) {
            let mut multiple = first;
            while multiple <= limit {
                composite[multiple] = true;
                multiple += candidate;
            }
        }
    }

    primes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primes_up_to_thirty() {
        assert_eq!(primes_up_to(30), [2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn bounds_below_two_yield_nothing() {
        assert!(primes_up_to(0).is_empty());
        assert!(primes_up_to(1).is_empty());
    }

    #[test]
    fn bound_equal_to_a_prime_includes_it() {
        assert_eq!(primes_up_to(2), [2]);
        assert_eq!(primes_up_to(13).last(), Some(&13));
    }
}
