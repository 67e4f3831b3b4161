//! Property tests: for any sequence of mint/transfer/burn operations, the
//! registry membership of an address is exactly `balance > 0`, with no
//! duplicate entries.

use holder_registry::testutils::{RegistryToken, RegistryTokenClient};
use proptest::prelude::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};

const ACCOUNTS: usize = 4;

#[derive(Clone, Debug)]
enum Op {
    Mint { to: usize, amount: i128 },
    Transfer { from: usize, to: usize, amount: i128 },
    Burn { from: usize, amount: i128 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..ACCOUNTS, 0i128..500).prop_map(|(to, amount)| Op::Mint { to, amount }),
        (0..ACCOUNTS, 0..ACCOUNTS, 0i128..500)
            .prop_map(|(from, to, amount)| Op::Transfer { from, to, amount }),
        (0..ACCOUNTS, 0i128..500).prop_map(|(from, amount)| Op::Burn { from, amount }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn membership_tracks_positive_balance(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let env = Env::default();
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let token = env.register(RegistryToken, ());
        let client = RegistryTokenClient::new(&env, &token);
        client.initialize(&admin);

        let accounts: Vec<Address> =
            (0..ACCOUNTS).map(|_| Address::generate(&env)).collect();

        for op in ops {
            match op {
                Op::Mint { to, amount } => client.mint(&accounts[to], &amount),
                Op::Transfer { from, to, amount } => {
                    // Clamp so the operation never rejects; the property is
                    // about registry state, not token error paths.
                    let available = client.balance(&accounts[from]);
                    let amount = amount.min(available);
                    client.transfer(&accounts[from], &accounts[to], &amount);
                }
                Op::Burn { from, amount } => {
                    let available = client.balance(&accounts[from]);
                    let amount = amount.min(available);
                    client.burn(&accounts[from], &amount);
                }
            }
        }

        let holders = client.holders();
        for account in &accounts {
            let registered = holders.iter().filter(|h| h == account).count();
            prop_assert!(registered <= 1, "duplicate registry entry");
            let expected = client.balance(account) > 0;
            prop_assert_eq!(registered == 1, expected);
        }
    }
}
