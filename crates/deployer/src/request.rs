//! The deployment request and its validation against the artifact's
//! constructor before anything is sent to the network.

use {
    crate::{chain::DeployTx, config::DeploymentParameters, error::DeploymentError},
    alloy::{
        primitives::{Address, Bytes, U256},
        signers::local::PrivateKeySigner,
    },
    alloy_dyn_abi::{DynSolType, DynSolValue, Specifier},
    alloy_json_abi::Param,
    contracts::Artifact,
    number::Ether,
};

/// 10000 basis points are 100%.
pub const MAX_ROYALTY_FEE_BPS: u64 = 10_000;

/// The constructor arguments, in the order the contract expects them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorArgs {
    pub name: String,
    pub symbol: String,
    pub max_supply: U256,
    pub mint_price: Ether,
    pub max_per_tx: U256,
    pub base_uri: String,
    pub royalty_receiver: Address,
    pub royalty_fee_bps: u64,
}

impl ConstructorArgs {
    fn values(&self) -> Vec<DynSolValue> {
        vec![
            DynSolValue::String(self.name.clone()),
            DynSolValue::String(self.symbol.clone()),
            DynSolValue::Uint(self.max_supply, 256),
            DynSolValue::Uint(self.mint_price.wei(), 256),
            DynSolValue::Uint(self.max_per_tx, 256),
            DynSolValue::String(self.base_uri.clone()),
            DynSolValue::Address(self.royalty_receiver),
            DynSolValue::Uint(U256::from(self.royalty_fee_bps), 256),
        ]
    }
}

#[derive(Debug)]
pub struct DeploymentRequest {
    pub contract_name: String,
    pub constructor_args: ConstructorArgs,
    pub signer: PrivateKeySigner,
}

impl DeploymentRequest {
    pub fn new(parameters: &DeploymentParameters, signer: PrivateKeySigner) -> Self {
        Self {
            contract_name: parameters.contract_name.clone(),
            constructor_args: ConstructorArgs {
                name: parameters.token_name.clone(),
                symbol: parameters.token_symbol.clone(),
                max_supply: U256::from(parameters.max_supply),
                mint_price: parameters.mint_price,
                max_per_tx: U256::from(parameters.max_per_tx),
                base_uri: parameters.base_uri.clone(),
                royalty_receiver: parameters
                    .royalty_receiver
                    .unwrap_or_else(|| signer.address()),
                royalty_fee_bps: parameters.royalty_fee_bps,
            },
            signer,
        }
    }

    /// Checks the arguments against the artifact's constructor and builds
    /// the creation transaction (bytecode followed by the ABI encoded
    /// arguments).
    pub fn validate(&self, artifact: &Artifact) -> Result<DeployTx, DeploymentError> {
        let args = &self.constructor_args;
        if args.royalty_fee_bps > MAX_ROYALTY_FEE_BPS {
            return Err(DeploymentError::InvalidArguments(format!(
                "royalty fee of {} basis points exceeds {MAX_ROYALTY_FEE_BPS}",
                args.royalty_fee_bps
            )));
        }
        if !artifact.is_deployable() {
            return Err(DeploymentError::InvalidArguments(format!(
                "artifact {} has no creation bytecode",
                artifact.contract_name
            )));
        }

        let inputs = artifact
            .constructor()
            .map(|constructor| constructor.inputs.as_slice())
            .unwrap_or_default();
        let values = args.values();
        if inputs.len() != values.len() {
            return Err(DeploymentError::InvalidArguments(format!(
                "constructor of {} expects {} arguments, got {}",
                artifact.contract_name,
                inputs.len(),
                values.len()
            )));
        }

        let values = inputs
            .iter()
            .zip(values)
            .enumerate()
            .map(|(i, (param, value))| {
                coerce(param, value).map_err(|reason| {
                    DeploymentError::InvalidArguments(format!(
                        "argument {i} ({}): {reason}",
                        param.name
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut input = artifact.bytecode.to_vec();
        input.extend(DynSolValue::Tuple(values).abi_encode_params());
        Ok(DeployTx {
            contract_name: self.contract_name.clone(),
            input: Bytes::from(input),
        })
    }
}

/// Converts `value` into the type the ABI declares for `param`. Unsigned
/// integers are narrowed to the declared width if they fit.
fn coerce(param: &Param, value: DynSolValue) -> Result<DynSolValue, String> {
    let ty: DynSolType = param
        .resolve()
        .map_err(|err| format!("unsupported type {}: {err}", param.ty))?;
    match (&ty, value) {
        (DynSolType::Uint(bits), DynSolValue::Uint(amount, _)) => {
            if amount.bit_len() <= *bits {
                Ok(DynSolValue::Uint(amount, *bits))
            } else {
                Err(format!("{amount} does not fit into {}", param.ty))
            }
        }
        (_, value) if ty.matches(&value) => Ok(value),
        (_, value) => Err(format!("expected {}, got {}", param.ty, describe(&value))),
    }
}

fn describe(value: &DynSolValue) -> &'static str {
    match value {
        DynSolValue::Uint(..) => "an unsigned integer",
        DynSolValue::String(_) => "a string",
        DynSolValue::Address(_) => "an address",
        _ => "an unsupported value",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use {super::*, alloy::primitives::address, rstest::rstest};

    pub const LION_KING_ABI: &str = r#"[
        {
            "type": "constructor",
            "stateMutability": "nonpayable",
            "inputs": [
                { "name": "name_", "type": "string", "internalType": "string" },
                { "name": "symbol_", "type": "string", "internalType": "string" },
                { "name": "maxSupply_", "type": "uint256", "internalType": "uint256" },
                { "name": "mintPrice_", "type": "uint256", "internalType": "uint256" },
                { "name": "maxPerTx_", "type": "uint256", "internalType": "uint256" },
                { "name": "baseURI_", "type": "string", "internalType": "string" },
                { "name": "royaltyReceiver", "type": "address", "internalType": "address" },
                { "name": "royaltyFeeNumerator", "type": "uint96", "internalType": "uint96" }
            ]
        }
    ]"#;

    pub const BYTECODE: [u8; 5] = [0x60, 0x80, 0x60, 0x40, 0x52];

    pub fn artifact_with_abi(abi: &str) -> Artifact {
        Artifact::from_json(&format!(
            r#"{{ "contractName": "LionKing", "abi": {abi}, "bytecode": "0x{}" }}"#,
            const_hex::encode(BYTECODE)
        ))
        .unwrap()
    }

    pub fn lion_king() -> Artifact {
        artifact_with_abi(LION_KING_ABI)
    }

    pub fn signer() -> PrivateKeySigner {
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
            .parse()
            .unwrap()
    }

    fn build_request(parameters: DeploymentParameters) -> DeploymentRequest {
        DeploymentRequest::new(&parameters, signer())
    }

    #[test]
    fn royalty_receiver_defaults_to_signer() {
        let request = build_request(DeploymentParameters::default());
        assert_eq!(
            request.constructor_args.royalty_receiver,
            address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );

        let receiver = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let request = build_request(DeploymentParameters {
            royalty_receiver: Some(receiver),
            ..Default::default()
        });
        assert_eq!(request.constructor_args.royalty_receiver, receiver);
    }

    #[test]
    fn encodes_creation_input() {
        let request = build_request(DeploymentParameters::default());
        let tx = request.validate(&lion_king()).unwrap();
        assert_eq!(tx.contract_name, "LionKing");
        assert_eq!(&tx.input[..BYTECODE.len()], &BYTECODE);

        let args = &tx.input[BYTECODE.len()..];
        // Head of 8 words, then 3 strings of one length and one data word each.
        assert_eq!(args.len(), 32 * (8 + 3 * 2));
        let word = |i: usize| U256::from_be_slice(&args[32 * i..32 * (i + 1)]);
        assert_eq!(word(2), U256::from(5000));
        assert_eq!(word(3), U256::from(30_000_000_000_000_000_u64));
        assert_eq!(word(4), U256::from(5));
        assert_eq!(
            Address::from_slice(&args[32 * 6 + 12..32 * 7]),
            request.signer.address()
        );
        assert_eq!(word(7), U256::from(500));
    }

    #[rstest]
    #[case::zero(0)]
    #[case::default(500)]
    #[case::everything(MAX_ROYALTY_FEE_BPS)]
    fn accepts_royalties_in_range(#[case] royalty_fee_bps: u64) {
        let request = build_request(DeploymentParameters {
            royalty_fee_bps,
            ..Default::default()
        });
        assert!(request.validate(&lion_king()).is_ok());
    }

    #[rstest]
    #[case::just_above(MAX_ROYALTY_FEE_BPS + 1)]
    #[case::way_above(u64::MAX)]
    fn rejects_royalties_out_of_range(#[case] royalty_fee_bps: u64) {
        let request = build_request(DeploymentParameters {
            royalty_fee_bps,
            ..Default::default()
        });
        assert!(matches!(
            request.validate(&lion_king()),
            Err(DeploymentError::InvalidArguments(_))
        ));
    }

    #[test]
    fn rejects_arity_mismatch() {
        let abi = r#"[{
            "type": "constructor",
            "stateMutability": "nonpayable",
            "inputs": [{ "name": "name_", "type": "string", "internalType": "string" }]
        }]"#;
        let err = build_request(DeploymentParameters::default())
            .validate(&artifact_with_abi(abi))
            .unwrap_err();
        assert!(matches!(err, DeploymentError::InvalidArguments(_)));
        assert!(err.to_string().contains("expects 1 arguments, got 8"));

        let err = build_request(DeploymentParameters::default())
            .validate(&artifact_with_abi("[]"))
            .unwrap_err();
        assert!(err.to_string().contains("expects 0 arguments, got 8"));
    }

    #[test]
    fn rejects_type_mismatch() {
        let abi = LION_KING_ABI.replacen(
            r#""name": "symbol_", "type": "string""#,
            r#""name": "symbol_", "type": "bytes32""#,
            1,
        );
        let err = build_request(DeploymentParameters::default())
            .validate(&artifact_with_abi(&abi))
            .unwrap_err();
        assert!(matches!(err, DeploymentError::InvalidArguments(_)));
        assert!(err.to_string().contains("argument 1 (symbol_)"));
    }

    #[test]
    fn rejects_values_exceeding_declared_width() {
        let abi = LION_KING_ABI.replacen(
            r#""name": "maxSupply_", "type": "uint256""#,
            r#""name": "maxSupply_", "type": "uint8""#,
            1,
        );
        let err = build_request(DeploymentParameters::default())
            .validate(&artifact_with_abi(&abi))
            .unwrap_err();
        assert!(err.to_string().contains("5000 does not fit into uint8"));
    }

    #[test]
    fn rejects_artifacts_without_bytecode() {
        let artifact = Artifact::from_json(&format!(
            r#"{{ "contractName": "LionKing", "abi": {LION_KING_ABI}, "bytecode": "0x" }}"#
        ))
        .unwrap();
        assert!(matches!(
            build_request(DeploymentParameters::default()).validate(&artifact),
            Err(DeploymentError::InvalidArguments(_))
        ));
    }
}
