//! Sequences a single deployment: resolve the signer, resolve the artifact,
//! validate the constructor arguments, submit, await confirmation and report.
//! Every step runs at most once and the first failure ends the run.

use {
    crate::{
        artifacts::ArtifactSource,
        chain::{ChainClient, Deployment},
        config::DeploymentParameters,
        error::DeploymentError,
        observe,
        request::DeploymentRequest,
        signer::SignerProvider,
    },
    anyhow::{Context, anyhow},
    std::{io::Write, sync::Arc},
};

pub struct Orchestrator {
    pub signers: Arc<dyn SignerProvider>,
    pub artifacts: Arc<dyn ArtifactSource>,
    pub chain: Arc<dyn ChainClient>,
    pub parameters: DeploymentParameters,
    /// When set, the node must report this chain ID before anything is
    /// submitted.
    pub expected_chain_id: Option<u64>,
}

impl Orchestrator {
    /// Runs the deployment, writing the report lines to `out`.
    pub async fn run(&self, out: &mut (dyn Write + Send)) -> Result<Deployment, DeploymentError> {
        let signer = self.signers.signer()?;
        observe::signer(signer.address());
        writeln!(out, "Deploying with {}", signer.address())
            .context("failed to write report")?;

        let artifact = self.artifacts.artifact(&self.parameters.contract_name)?;
        observe::artifact(&artifact);

        let request = DeploymentRequest::new(&self.parameters, signer);
        let tx = request.validate(&artifact)?;

        let chain_id = self.chain.chain_id().await?;
        observe::chain_id(chain_id);
        if let Some(expected) = self
            .expected_chain_id
            .filter(|expected| *expected != chain_id)
        {
            return Err(anyhow!("node is on chain {chain_id}, expected chain {expected}").into());
        }

        observe::submitting(&tx);
        let deployment = self.chain.deploy(&request.signer, tx).await?;
        observe::deployed(&request.contract_name, &deployment);
        writeln!(
            out,
            "{} deployed to: {}",
            request.contract_name, deployment.address
        )
        .context("failed to write report")?;

        Ok(deployment)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            artifacts::MockArtifactSource,
            chain::MockChainClient,
            request::tests::{BYTECODE, lion_king, signer},
            signer::MockSignerProvider,
        },
        alloy::primitives::{Address, B256, address},
    };

    const DEPLOYED: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

    fn deployment() -> Deployment {
        Deployment {
            address: DEPLOYED,
            tx_hash: B256::repeat_byte(1),
            block_number: Some(1),
            gas_used: 2_500_000,
        }
    }

    fn signers() -> MockSignerProvider {
        let mut signers = MockSignerProvider::new();
        signers.expect_signer().times(1).returning(|| Ok(signer()));
        signers
    }

    fn artifacts() -> MockArtifactSource {
        let mut artifacts = MockArtifactSource::new();
        artifacts
            .expect_artifact()
            .withf(|name| name == "LionKing")
            .times(1)
            .returning(|_| Ok(lion_king()));
        artifacts
    }

    fn chain_returning(
        deploy: impl Fn() -> Result<Deployment, DeploymentError> + Send + 'static,
    ) -> MockChainClient {
        let mut chain = MockChainClient::new();
        chain.expect_chain_id().returning(|| Ok(31337));
        chain
            .expect_deploy()
            .times(1)
            .returning(move |_, _| deploy());
        chain
    }

    fn orchestrator(
        signers: MockSignerProvider,
        artifacts: MockArtifactSource,
        chain: MockChainClient,
    ) -> Orchestrator {
        Orchestrator {
            signers: Arc::new(signers),
            artifacts: Arc::new(artifacts),
            chain: Arc::new(chain),
            parameters: DeploymentParameters::default(),
            expected_chain_id: None,
        }
    }

    fn lines(out: Vec<u8>) -> Vec<String> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[tokio::test]
    async fn deploys_and_reports() {
        ::observe::tracing::initialize_reentrant("deployer=debug");
        let mut chain = MockChainClient::new();
        chain.expect_chain_id().returning(|| Ok(31337));
        chain
            .expect_deploy()
            .withf(|signer, tx| {
                signer.address() == address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
                    && tx.contract_name == "LionKing"
                    && tx.input.starts_with(&BYTECODE)
            })
            .times(1)
            .returning(|_, _| Ok(deployment()));

        let mut out = Vec::new();
        let result = orchestrator(signers(), artifacts(), chain)
            .run(&mut out)
            .await
            .unwrap();

        assert_eq!(result, deployment());
        assert_ne!(result.address, signer().address());
        assert_eq!(
            lines(out),
            [
                "Deploying with 0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
                "LionKing deployed to: 0x5FbDB2315678afecb367f032d93F642f64180aa3",
            ]
        );
    }

    #[tokio::test]
    async fn stops_without_signer() {
        let mut signers = MockSignerProvider::new();
        signers.expect_signer().times(1).returning(|| {
            Err(DeploymentError::SignerUnavailable("not configured".to_string()))
        });
        let mut artifacts = MockArtifactSource::new();
        artifacts.expect_artifact().never();
        let mut chain = MockChainClient::new();
        chain.expect_chain_id().never();
        chain.expect_deploy().never();

        let mut out = Vec::new();
        let result = orchestrator(signers, artifacts, chain).run(&mut out).await;

        assert!(matches!(result, Err(DeploymentError::SignerUnavailable(_))));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn stops_on_unknown_artifact() {
        let mut artifacts = MockArtifactSource::new();
        artifacts
            .expect_artifact()
            .times(1)
            .returning(|name| Err(DeploymentError::ArtifactNotFound(name.to_string())));
        let mut chain = MockChainClient::new();
        chain.expect_chain_id().never();
        chain.expect_deploy().never();

        let mut out = Vec::new();
        let result = orchestrator(signers(), artifacts, chain).run(&mut out).await;

        assert!(matches!(
            result,
            Err(DeploymentError::ArtifactNotFound(name)) if name == "LionKing"
        ));
        assert_eq!(lines(out).len(), 1);
    }

    #[tokio::test]
    async fn rejects_invalid_arguments_before_submitting() {
        let mut chain = MockChainClient::new();
        chain.expect_chain_id().never();
        chain.expect_deploy().never();

        let mut orchestrator = orchestrator(signers(), artifacts(), chain);
        orchestrator.parameters.royalty_fee_bps = 10_001;
        let mut out = Vec::new();
        let result = orchestrator.run(&mut out).await;

        assert!(matches!(result, Err(DeploymentError::InvalidArguments(_))));
    }

    #[tokio::test]
    async fn reports_reverted_deployment() {
        let chain = chain_returning(|| {
            Err(DeploymentError::DeploymentRejected {
                tx_hash: Some(B256::repeat_byte(2)),
                reason: "reverted".to_string(),
            })
        });

        let mut out = Vec::new();
        let result = orchestrator(signers(), artifacts(), chain)
            .run(&mut out)
            .await;

        assert!(matches!(
            result,
            Err(DeploymentError::DeploymentRejected { tx_hash: Some(_), .. })
        ));
        let lines = lines(out);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Deploying with"));
    }

    #[tokio::test]
    async fn surfaces_connection_failures_as_unknown() {
        let chain = chain_returning(|| Err(anyhow!("connection refused").into()));

        let mut out = Vec::new();
        let result = orchestrator(signers(), artifacts(), chain)
            .run(&mut out)
            .await;

        assert!(matches!(result, Err(DeploymentError::Unknown(_))));
    }

    #[tokio::test]
    async fn refuses_unexpected_chain() {
        let mut chain = MockChainClient::new();
        chain.expect_chain_id().times(1).returning(|| Ok(1));
        chain.expect_deploy().never();

        let mut orchestrator = orchestrator(signers(), artifacts(), chain);
        orchestrator.expected_chain_id = Some(31337);
        let mut out = Vec::new();
        let result = orchestrator.run(&mut out).await;

        assert!(matches!(result, Err(DeploymentError::Unknown(err))
            if err.to_string().contains("expected chain 31337")));
    }

    #[tokio::test]
    async fn deploys_with_custom_parameters() {
        let mut artifacts = MockArtifactSource::new();
        artifacts
            .expect_artifact()
            .withf(|name| name == "TigerKing")
            .times(1)
            .returning(|_| Ok(lion_king()));
        let chain = chain_returning(|| Ok(deployment()));

        let mut orchestrator = orchestrator(signers(), artifacts, chain);
        orchestrator.parameters.contract_name = "TigerKing".to_string();
        orchestrator.expected_chain_id = Some(31337);
        let mut out = Vec::new();
        orchestrator.run(&mut out).await.unwrap();

        assert_eq!(
            lines(out)[1],
            "TigerKing deployed to: 0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
    }
}
