#![no_main]
use ate::{
    pair, pair_cubical, pair_cubical_fixed_q, pair_fixed_q, pairing_check, precompute_cubical,
    precompute_lines, Fr, G1Affine, G1Projective, G2Affine, G2Projective, GroupTrait, Gt,
};
use crypto_bigint::U256;
use libfuzzer_sys::fuzz_target;
use num_traits::Zero;

fuzz_target!(|data: &[u8]| {
    if data.len() < 64 {
        return;
    }
    let s = Fr::new(U256::from_le_slice(&data[..32]));
    let t = Fr::new(U256::from_le_slice(&data[32..64]));

    let p = G1Affine::from(G1Projective::generator() * s);
    let q = G2Affine::from(G2Projective::generator() * t);

    // e([s]g1, [t]g2) = e(g1, g2)^{st}
    let e = pair(&[p], &[q]).expect("equal lengths");
    assert_eq!(e, Gt::generator() * (s * t), "Pairing bilinearity property failed");
    assert_eq!(
        e == Gt::identity(),
        (s * t).is_zero(),
        "Pairing is degenerate away from the identity"
    );
    assert!(
        pairing_check(&[p, -p], &[q, q]).expect("equal lengths"),
        "Pairing inverse property failed"
    );

    let lines = [precompute_lines(&q)];
    assert_eq!(
        pair_fixed_q(&[p], &lines).expect("equal lengths"),
        e,
        "Fixed argument pairing disagrees"
    );

    let squared = pair_cubical(&[p], &[q]).expect("equal lengths");
    assert_eq!(squared, e.double(), "Cubical pairing is not the square");
    let pre = precompute_cubical(&q);
    assert_eq!(
        pair_cubical_fixed_q(&[p], &pre).expect("nonempty"),
        squared,
        "Fixed argument cubical pairing disagrees"
    );
});
