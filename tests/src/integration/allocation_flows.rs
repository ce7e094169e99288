//! # Integration Test Flows
//!
//! Full allocation lifecycles driven through the `AllocatorApi` port:
//! phase control, presale commit/reveal under both claim modes, public
//! minting, the guarded batch executor, and pull-payment withdrawals.

#[cfg(test)]
mod tests {
    use crate::util::{addr, WhitelistFixture};
    use fairdrop_allocator::domain::batch::encode_public_mint;
    use fairdrop_allocator::prelude::*;

    const SECRET: &[u8] = b"my-secret";

    // =========================================================================
    // PHASE CONTROL
    // =========================================================================

    #[tokio::test]
    async fn test_everything_starts_closed() {
        let fixture = WhitelistFixture::new(&[addr(1)]);
        let service = create_test_service(fixture.root(), ClaimMode::PerPrincipal);
        assert_eq!(service.phase().await, SalePhase::Closed);

        let proof = fixture.proof_for(0);
        let err = service.commit(addr(1), 0, &proof, SECRET).await.unwrap_err();
        assert!(matches!(err, AllocatorError::WrongPhase { .. }));

        let fee = service.public_mint_fee().await;
        let err = service.public_mint(addr(1), fee).await.unwrap_err();
        assert!(matches!(err, AllocatorError::WrongPhase { .. }));
    }

    #[tokio::test]
    async fn test_only_operator_moves_phases() {
        let service = create_test_service(Hash::ZERO, ClaimMode::PerPrincipal);

        let err = service
            .set_phase(addr(7), SalePhase::Public)
            .await
            .unwrap_err();
        assert_eq!(err, AllocatorError::NotOperator);

        service
            .set_phase(test_operator(), SalePhase::Presale)
            .await
            .unwrap();
        service
            .set_phase(test_operator(), SalePhase::Public)
            .await
            .unwrap();
        assert_eq!(service.phase().await, SalePhase::Public);
    }

    // =========================================================================
    // PRESALE: COMMIT / REVEAL
    // =========================================================================

    #[tokio::test]
    async fn test_whitelisted_commit_and_reveal() {
        let fixture = WhitelistFixture::new(&[addr(1), addr(2), addr(3), addr(4)]);
        let service = create_test_service(fixture.root(), ClaimMode::PerPrincipal);
        service
            .set_phase(test_operator(), SalePhase::Presale)
            .await
            .unwrap();

        let proof = fixture.proof_for(0);
        service.commit(addr(1), 0, &proof, SECRET).await.unwrap();

        // The stored digest binds principal and secret.
        let digest = service.committed_digest(addr(1)).await;
        assert_eq!(digest, Some(commit_digest(addr(1), SECRET)));

        let token_id = service.reveal(addr(1), SECRET).await.unwrap();
        assert!(token_id.value() < AllocatorConfig::DEFAULT_MAX_SUPPLY);
        assert_eq!(service.vault().owner_of(token_id).await, Some(addr(1)));
        assert_eq!(service.vault().balance_of(addr(1)).await, 1);
        assert!(service.has_claimed_principal(addr(1)).await);
    }

    #[tokio::test]
    async fn test_unwhitelisted_principal_rejected() {
        let fixture = WhitelistFixture::new(&[addr(1), addr(2)]);
        let service = create_test_service(fixture.root(), ClaimMode::PerPrincipal);
        service
            .set_phase(test_operator(), SalePhase::Presale)
            .await
            .unwrap();

        // Unknown principal, unheld position, no proof.
        let err = service.commit(addr(9), 9999, &[], SECRET).await.unwrap_err();
        assert_eq!(err.to_string(), "Not whitelisted");

        // Known principal presenting another member's proof.
        let wrong_proof = fixture.proof_for(1);
        let err = service
            .commit(addr(1), 0, &wrong_proof, SECRET)
            .await
            .unwrap_err();
        assert_eq!(err, AllocatorError::NotWhitelisted);
    }

    #[tokio::test]
    async fn test_position_mode_marks_bitmap_slot() {
        let fixture = WhitelistFixture::new(&[addr(1), addr(2), addr(3)]);
        let service = create_test_service(fixture.root(), ClaimMode::PerPosition);
        service
            .set_phase(test_operator(), SalePhase::Presale)
            .await
            .unwrap();

        let proof = fixture.proof_for(2);
        service.commit(addr(3), 2, &proof, SECRET).await.unwrap();
        service.reveal(addr(3), SECRET).await.unwrap();

        assert!(service.has_claimed_position(2).await);
        assert!(!service.has_claimed_position(0).await);
        assert!(!service.has_claimed_principal(addr(3)).await);
    }

    #[tokio::test]
    async fn test_five_reveals_yield_five_distinct_ids() {
        let members: Vec<Address> = (1..=5).map(addr).collect();
        let fixture = WhitelistFixture::new(&members);
        let service = create_test_service(fixture.root(), ClaimMode::PerPrincipal);
        service
            .set_phase(test_operator(), SalePhase::Presale)
            .await
            .unwrap();

        let mut ids = Vec::new();
        for &(position, principal) in fixture.members() {
            let proof = fixture.proof_for(position);
            service
                .commit(principal, position, &proof, SECRET)
                .await
                .unwrap();
            ids.push(service.reveal(principal, SECRET).await.unwrap());
        }

        assert_eq!(service.vault().minted_count().await, 5);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5, "every reveal must mint a distinct identifier");
    }

    // =========================================================================
    // PUBLIC SALE
    // =========================================================================

    #[tokio::test]
    async fn test_public_mint_charges_fixed_fee() {
        let service = create_test_service(Hash::ZERO, ClaimMode::PerPrincipal);
        service
            .set_phase(test_operator(), SalePhase::Public)
            .await
            .unwrap();
        let fee = service.public_mint_fee().await;

        // One unit short.
        let err = service
            .public_mint(addr(1), fee - U256::from(1))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Insufficient ETH");
        assert_eq!(service.vault().balance_of(addr(1)).await, 0);

        // Exact fee and overpayment both mint.
        service.public_mint(addr(1), fee).await.unwrap();
        service
            .public_mint(addr(1), fee + U256::from(5))
            .await
            .unwrap();
        assert_eq!(service.vault().balance_of(addr(1)).await, 2);
    }

    #[tokio::test]
    async fn test_public_mint_needs_no_whitelist_standing() {
        let fixture = WhitelistFixture::new(&[addr(1)]);
        let service = create_test_service(fixture.root(), ClaimMode::PerPrincipal);
        service
            .set_phase(test_operator(), SalePhase::Public)
            .await
            .unwrap();

        let fee = service.public_mint_fee().await;
        let token_id = service.public_mint(addr(9), fee).await.unwrap();
        assert_eq!(service.vault().owner_of(token_id).await, Some(addr(9)));
    }

    // =========================================================================
    // GUARDED BATCH EXECUTOR
    // =========================================================================

    #[tokio::test]
    async fn test_batch_dispatches_transfers() {
        let service = create_test_service(Hash::ZERO, ClaimMode::PerPrincipal);
        service
            .set_phase(test_operator(), SalePhase::Public)
            .await
            .unwrap();
        let fee = service.public_mint_fee().await;
        let id_a = service.public_mint(addr(1), fee).await.unwrap();
        let id_b = service.public_mint(addr(1), fee).await.unwrap();

        let calls = vec![
            encode_transfer_from(addr(1), addr(2), id_a),
            encode_transfer_from(addr(1), addr(3), id_b),
        ];
        service.execute_batch(addr(1), &calls).await.unwrap();

        assert_eq!(service.vault().owner_of(id_a).await, Some(addr(2)));
        assert_eq!(service.vault().owner_of(id_b).await, Some(addr(3)));
        assert_eq!(service.vault().balance_of(addr(1)).await, 0);
    }

    #[tokio::test]
    async fn test_batch_refuses_non_transfer_calls() {
        let service = create_test_service(Hash::ZERO, ClaimMode::PerPrincipal);
        service
            .set_phase(test_operator(), SalePhase::Public)
            .await
            .unwrap();
        let fee = service.public_mint_fee().await;
        let token_id = service.public_mint(addr(1), fee).await.unwrap();

        // A mint call smuggled after a valid transfer rejects the whole batch.
        let calls = vec![
            encode_transfer_from(addr(1), addr(2), token_id),
            encode_public_mint(),
        ];
        let err = service.execute_batch(addr(1), &calls).await.unwrap_err();
        assert_eq!(err.to_string(), "Only transfer calls allowed");
        assert_eq!(service.vault().owner_of(token_id).await, Some(addr(1)));
    }

    #[tokio::test]
    async fn test_batch_refuses_zero_sender() {
        let service = create_test_service(Hash::ZERO, ClaimMode::PerPrincipal);
        service
            .set_phase(test_operator(), SalePhase::Public)
            .await
            .unwrap();
        let fee = service.public_mint_fee().await;
        let token_id = service.public_mint(addr(1), fee).await.unwrap();

        let calls = vec![encode_transfer_from(Address::ZERO, addr(2), token_id)];
        let err = service.execute_batch(addr(1), &calls).await.unwrap_err();
        assert_eq!(err.to_string(), "from cannot be zero");
    }

    // =========================================================================
    // PULL PAYMENTS
    // =========================================================================

    #[tokio::test]
    async fn test_credit_then_withdraw() {
        let service = create_test_service(Hash::ZERO, ClaimMode::PerPrincipal);
        let amount = U256::from(1_000_000_000u64);

        // Anyone may fund a beneficiary; credits accumulate.
        service.credit(addr(9), addr(1), amount).await.unwrap();
        service.credit(addr(8), addr(1), amount).await.unwrap();
        assert_eq!(
            service.contribution_balance(addr(1)).await,
            amount + amount
        );

        let paid = service.withdraw(addr(1)).await.unwrap();
        assert_eq!(paid, amount + amount);
        assert!(service.contribution_balance(addr(1)).await.is_zero());
        assert_eq!(service.treasury().paid_to(addr(1)), amount + amount);
    }

    #[tokio::test]
    async fn test_withdraw_without_balance_rejected() {
        let service = create_test_service(Hash::ZERO, ClaimMode::PerPrincipal);
        let err = service.withdraw(addr(1)).await.unwrap_err();
        assert_eq!(err, AllocatorError::NothingToWithdraw);
    }

    // =========================================================================
    // FULL LIFECYCLE
    // =========================================================================

    #[tokio::test]
    async fn test_whole_sale_lifecycle() {
        let fixture = WhitelistFixture::new(&[addr(1), addr(2)]);
        let service = create_test_service(fixture.root(), ClaimMode::PerPrincipal);
        let operator = test_operator();

        // Presale: whitelisted members commit and reveal.
        service.set_phase(operator, SalePhase::Presale).await.unwrap();
        let proof = fixture.proof_for(0);
        service.commit(addr(1), 0, &proof, SECRET).await.unwrap();
        let presale_id = service.reveal(addr(1), SECRET).await.unwrap();

        // Public: anyone mints for the fee.
        service.set_phase(operator, SalePhase::Public).await.unwrap();
        let fee = service.public_mint_fee().await;
        let public_id = service.public_mint(addr(5), fee).await.unwrap();
        assert_ne!(presale_id, public_id);

        // Presale participant trades through the batch executor.
        let calls = vec![encode_transfer_from(addr(1), addr(5), presale_id)];
        service.execute_batch(addr(1), &calls).await.unwrap();
        assert_eq!(service.vault().balance_of(addr(5)).await, 2);

        // Owed value is pulled, not pushed.
        service
            .credit(operator, addr(1), U256::from(777))
            .await
            .unwrap();
        assert_eq!(service.withdraw(addr(1)).await.unwrap(), U256::from(777));

        let stats = service.stats().await;
        assert_eq!(stats.commits_recorded, 1);
        assert_eq!(stats.tokens_revealed, 1);
        assert_eq!(stats.public_mints, 1);
        assert_eq!(stats.batches_executed, 1);
        assert_eq!(stats.withdrawals_settled, 1);
    }
}
