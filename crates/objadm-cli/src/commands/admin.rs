//! Top-level admin CLI command enum.

use std::future::Future;
use std::io::Write;

use clap::Subcommand;

use super::idp::IdpCommands;
use super::policy::PolicyCommands;
use crate::connection::AdminEnv;
use crate::error::{CommandError, CommandResult};
use crate::messages::Outcome;
use crate::output::Printer;

/// Top-level admin command set.
#[derive(Debug, Subcommand)]
pub enum AdminCommands {
    /// Identity provider configuration (set, openid list, ldap list).
    #[command(subcommand)]
    Idp(IdpCommands),

    /// Policy associations (attach, detach).
    #[command(subcommand)]
    Policy(PolicyCommands),
}

impl AdminCommands {
    /// Execute the command and return its outcome messages.
    ///
    /// Nothing is printed here; a failed command yields no outcomes at all.
    pub async fn execute(&self, env: &AdminEnv) -> CommandResult<Vec<Outcome>> {
        match self {
            Self::Idp(cmd) => cmd.execute(env).await,
            Self::Policy(cmd) => cmd.execute(env).await,
        }
    }

    /// Execute and print the outcomes, or a single diagnostic on failure.
    pub async fn run<W: Write>(&self, env: &AdminEnv, printer: &mut Printer<W>) -> CommandResult<()> {
        let result = match self.execute(env).await {
            Ok(outcomes) => outcomes
                .iter()
                .try_for_each(|outcome| printer.print_msg(outcome))
                .map_err(CommandError::from),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            tracing::debug!(error = %e, exit_code = e.exit_code(), "command failed");
            if let Err(io_err) = printer.print_error(e) {
                tracing::warn!(error = %io_err, "failed to write diagnostic");
            }
        }
        if let Err(io_err) = printer.flush() {
            tracing::warn!(error = %io_err, "failed to flush output");
        }
        result
    }

    /// Like [`run`](Self::run), but abandons the command when `cancel`
    /// completes first. The in-flight request is dropped and a single
    /// `Interrupted` diagnostic is printed.
    pub async fn run_until<W, F>(&self, env: &AdminEnv, printer: &mut Printer<W>, cancel: F) -> CommandResult<()>
    where
        W: Write,
        F: Future<Output = ()>,
    {
        let completed = tokio::select! {
            result = self.run(env, printer) => Some(result),
            () = cancel => None,
        };
        if let Some(result) = completed {
            return result;
        }

        tracing::warn!("interrupted");
        let err = CommandError::Interrupted;
        if let Err(io_err) = printer.print_error(&err).and_then(|()| printer.flush()) {
            tracing::warn!(error = %io_err, "failed to write diagnostic");
        }
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock::{env_with, MockAdminClient, MockSessionProvider};
    use crate::output::OutputFormat;
    use crate::style::Theme;
    use clap::Parser;

    #[derive(Debug, Parser)]
    #[command(name = "objadm")]
    struct TestCli {
        #[command(subcommand)]
        command: AdminCommands,
    }

    fn parse(argv: &[&str]) -> AdminCommands {
        let argv = std::iter::once("objadm").chain(argv.iter().copied());
        TestCli::try_parse_from(argv).unwrap().command
    }

    async fn run(
        argv: &[&str],
        provider: &std::sync::Arc<MockSessionProvider>,
        format: OutputFormat,
    ) -> (CommandResult<()>, String, String) {
        let env = env_with(provider);
        let mut out = Vec::new();
        let mut errs = Vec::new();
        let result = {
            let out_w: &mut dyn Write = &mut out;
            let err_w: &mut dyn Write = &mut errs;
            let mut printer = Printer::new(out_w, err_w, format, Theme::plain());
            parse(argv).run(&env, &mut printer).await
        };
        (result, String::from_utf8(out).unwrap(), String::from_utf8(errs).unwrap())
    }

    #[test]
    fn test_parse_command_tree() {
        assert!(matches!(
            parse(&["idp", "set", "--update", "play/", "openid", "dex", "a=b"]),
            AdminCommands::Idp(IdpCommands::Set(ref s)) if s.update && s.args.len() == 4
        ));
        assert!(matches!(
            parse(&["idp", "openid", "ls", "play/"]),
            AdminCommands::Idp(IdpCommands::Openid(_))
        ));
        assert!(matches!(
            parse(&["idp", "ldap", "list", "play/"]),
            AdminCommands::Idp(IdpCommands::Ldap(_))
        ));
        match parse(&["policy", "detach", "myminio", "p1", "p2", "-g", "legal"]) {
            AdminCommands::Policy(PolicyCommands::Detach(a)) => {
                assert_eq!(a.args, vec!["myminio", "p1", "p2"]);
                assert_eq!(a.group.as_deref(), Some("legal"));
                assert!(a.user.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_keeps_ldap_values() {
        match parse(&[
            "idp",
            "set",
            "play/",
            "ldap",
            "lookup_bind_dn=cn=readonly,ou=service_account,dc=min,dc=io",
            "user_dn_search_filter=(uid=%s)",
        ]) {
            AdminCommands::Idp(IdpCommands::Set(s)) => {
                assert_eq!(s.args[2], "lookup_bind_dn=cn=readonly,ou=service_account,dc=min,dc=io");
                assert_eq!(s.args[3], "user_dn_search_filter=(uid=%s)");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_prints_one_line_per_policy() {
        let provider = MockSessionProvider::new(MockAdminClient::default());
        let (result, out, errs) = run(
            &["policy", "attach", "A", "policy1", "policy2", "--user", "bob"],
            &provider,
            OutputFormat::Table,
        )
        .await;

        assert!(result.is_ok());
        assert!(errs.is_empty());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Policy `policy1` is attached to user `bob`.",
                "Policy `policy2` is attached to user `bob`.",
            ]
        );
    }

    #[tokio::test]
    async fn test_run_failing_attach_prints_single_diagnostic() {
        let provider = MockSessionProvider::new(MockAdminClient::default().failing(403, "Access Denied."));
        let (result, out, errs) = run(
            &["policy", "attach", "A", "p1", "p2", "p3", "--group", "g"],
            &provider,
            OutputFormat::Table,
        )
        .await;

        assert_eq!(result.unwrap_err().exit_code(), 5);
        assert!(out.is_empty(), "unexpected outcome output: {}", out);
        assert_eq!(errs.lines().count(), 1);
        assert!(errs.starts_with("objadm: <ERROR> Unable to attach the policy on 'A': Access Denied."));
    }

    #[tokio::test]
    async fn test_run_idp_set_usage_error() {
        let provider = MockSessionProvider::new(MockAdminClient::default());
        let (result, out, errs) = run(&["idp", "set", "play/", "openid"], &provider, OutputFormat::Table).await;

        assert_eq!(result.unwrap_err().exit_code(), 1);
        assert!(out.is_empty());
        assert!(errs.contains("USAGE:"));
        assert_eq!(provider.resolve_count(), 0);
    }

    #[tokio::test]
    async fn test_run_json_output() {
        let provider = MockSessionProvider::new(MockAdminClient::default().with_restart(true));
        let (result, out, _) = run(
            &["idp", "set", "play/", "openid", "client_id=app"],
            &provider,
            OutputFormat::Json,
        )
        .await;

        assert!(result.is_ok());
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["status"], "success");
        assert_eq!(parsed["targetAlias"], "play/");
        assert_eq!(parsed["restart"], true);
    }

    #[tokio::test]
    async fn test_cancel_drops_in_flight_request() {
        let provider = MockSessionProvider::new(MockAdminClient::default().hanging());
        let client = provider.client();
        let env = env_with(&provider);

        let in_flight = client.clone();
        let cancel = async move {
            while in_flight.recorded().is_empty() {
                tokio::task::yield_now().await;
            }
        };

        let mut out = Vec::new();
        let mut errs = Vec::new();
        let result = {
            let out_w: &mut dyn Write = &mut out;
            let err_w: &mut dyn Write = &mut errs;
            let mut printer = Printer::new(out_w, err_w, OutputFormat::Table, Theme::plain());
            parse(&["policy", "attach", "A", "p1", "p2", "--user", "bob"])
                .run_until(&env, &mut printer, cancel)
                .await
        };

        let err = result.unwrap_err();
        assert!(matches!(err, CommandError::Interrupted));
        assert_eq!(err.exit_code(), 130);
        assert!(client.was_cancelled());
        assert_eq!(client.recorded().len(), 1);

        let out = String::from_utf8(out).unwrap();
        let errs = String::from_utf8(errs).unwrap();
        assert!(out.is_empty(), "unexpected outcome output: {}", out);
        assert_eq!(errs, "objadm: <ERROR> Interrupted\n");
    }

    #[tokio::test]
    async fn test_run_until_without_cancel_completes() {
        let provider = MockSessionProvider::new(MockAdminClient::default());
        let env = env_with(&provider);

        let mut out = Vec::new();
        let mut errs = Vec::new();
        let result = {
            let out_w: &mut dyn Write = &mut out;
            let err_w: &mut dyn Write = &mut errs;
            let mut printer = Printer::new(out_w, err_w, OutputFormat::Table, Theme::plain());
            parse(&["policy", "detach", "A", "p1", "--group", "g"])
                .run_until(&env, &mut printer, std::future::pending())
                .await
        };

        assert!(result.is_ok());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Policy `p1` is detached from group `g`.\n"
        );
        assert!(errs.is_empty());
    }

    #[tokio::test]
    async fn test_run_json_error_object() {
        let provider = MockSessionProvider::unresolvable();
        let (result, out, errs) = run(&["idp", "ldap", "ls", "nowhere"], &provider, OutputFormat::Json).await;

        assert_eq!(result.unwrap_err().exit_code(), 3);
        assert!(out.is_empty());
        let parsed: serde_json::Value = serde_json::from_str(errs.trim()).unwrap();
        assert_eq!(parsed["status"], "error");
        assert_eq!(parsed["error"]["message"], "Unable to initialize admin connection");
        assert_eq!(parsed["error"]["exitCode"], 3);
    }
}
