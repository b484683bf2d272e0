//! whoami command - Show the caller identity as JSON

use tokio::io::AsyncWrite;

use s3c_core::Result;

use super::Context;
use crate::output::Printer;

/// Execute the whoami command
pub async fn execute<O, E>(ctx: &Context<'_>, printer: &mut Printer<O, E>) -> Result<()>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let identity = ctx.identity.caller_identity().await?;
    printer.json(&identity).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{context, output, printer, MemoryStore};
    use async_trait::async_trait;
    use s3c_core::{CallerIdentity, Error, IdentityService};

    mockall::mock! {
        Identity {}

        #[async_trait]
        impl IdentityService for Identity {
            async fn caller_identity(&self) -> Result<CallerIdentity>;
        }
    }

    #[tokio::test]
    async fn test_whoami_prints_indented_json() {
        let mut identity = MockIdentity::new();
        identity.expect_caller_identity().times(1).returning(|| {
            Ok(CallerIdentity {
                user_id: Some("AIDAEXAMPLE".into()),
                account: Some("123456789012".into()),
                arn: Some("arn:aws:iam::123456789012:user/alice".into()),
            })
        });

        let store = MemoryStore::default();
        let mut ctx = context(&store);
        ctx.identity = &identity;
        let mut printer = printer();

        execute(&ctx, &mut printer).await.unwrap();

        let (out, _) = output(printer);
        assert_eq!(
            out,
            "{\n  \"UserId\": \"AIDAEXAMPLE\",\n  \"Account\": \"123456789012\",\n  \
             \"Arn\": \"arn:aws:iam::123456789012:user/alice\"\n}\n"
        );
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_whoami_propagates_error() {
        let mut identity = MockIdentity::new();
        identity
            .expect_caller_identity()
            .returning(|| Err(Error::AccessDenied("sts".into())));

        let store = MemoryStore::default();
        let mut ctx = context(&store);
        ctx.identity = &identity;
        let mut printer = printer();

        let err = execute(&ctx, &mut printer).await.unwrap_err();
        assert!(matches!(err, Error::AccessDenied(_)));
        assert!(output(printer).0.is_empty());
    }
}
