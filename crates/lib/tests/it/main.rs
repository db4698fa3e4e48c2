/*! Integration tests for the Courier Console shell.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - storage: Tests for the PreferenceStore trait and implementations
 * - session: Tests for login/logout against a loopback auth endpoint
 * - settings: Tests for the bootstrap state machine and merge-and-persist
 * - shell: Tests for the composition root and capability gating
 * - update: Tests for the update-available signal
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("courier_console=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod session;
