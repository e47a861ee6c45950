//! Static quadrature tables.
//!
//! Gauss-Legendre rules on [-1, 1] as `(node, weight)` pairs and symmetric
//! triangle rules on the reference triangle (0,0)-(1,0)-(0,1) as
//! `(ξ, η, weight)` with weights summing to the reference area 1/2.
//! Requests between tabulated orders round up; requests beyond the largest
//! table saturate.

/// 2-point Gauss-Legendre rule (degree 3)
pub const GL2: [(f64, f64); 2] = [
    (-0.577_350_269_189_625_7, 1.0),
    (0.577_350_269_189_625_7, 1.0),
];

/// 4-point Gauss-Legendre rule (degree 7)
pub const GL4: [(f64, f64); 4] = [
    (-0.861_136_311_594_052_6, 0.347_854_845_137_453_9),
    (-0.339_981_043_584_856_3, 0.652_145_154_862_546_1),
    (0.339_981_043_584_856_3, 0.652_145_154_862_546_1),
    (0.861_136_311_594_052_6, 0.347_854_845_137_453_9),
];

/// 8-point Gauss-Legendre rule (degree 15)
pub const GL8: [(f64, f64); 8] = [
    (-0.960_289_856_497_536_3, 0.101_228_536_290_376_3),
    (-0.796_666_477_413_626_7, 0.222_381_034_453_374_5),
    (-0.525_532_409_916_329_0, 0.313_706_645_877_887_3),
    (-0.183_434_642_495_649_8, 0.362_683_783_378_362_0),
    (0.183_434_642_495_649_8, 0.362_683_783_378_362_0),
    (0.525_532_409_916_329_0, 0.313_706_645_877_887_3),
    (0.796_666_477_413_626_7, 0.222_381_034_453_374_5),
    (0.960_289_856_497_536_3, 0.101_228_536_290_376_3),
];

/// 12-point Gauss-Legendre rule (degree 23)
pub const GL12: [(f64, f64); 12] = [
    (-0.981_560_634_246_719_2, 0.047_175_336_386_511_8),
    (-0.904_117_256_370_474_9, 0.106_939_325_995_318_4),
    (-0.769_902_674_194_304_7, 0.160_078_328_543_346_2),
    (-0.587_317_954_286_617_5, 0.203_167_426_723_065_9),
    (-0.367_831_498_998_180_2, 0.233_492_536_538_354_8),
    (-0.125_233_408_511_468_9, 0.249_147_045_813_402_8),
    (0.125_233_408_511_468_9, 0.249_147_045_813_402_8),
    (0.367_831_498_998_180_2, 0.233_492_536_538_354_8),
    (0.587_317_954_286_617_5, 0.203_167_426_723_065_9),
    (0.769_902_674_194_304_7, 0.160_078_328_543_346_2),
    (0.904_117_256_370_474_9, 0.106_939_325_995_318_4),
    (0.981_560_634_246_719_2, 0.047_175_336_386_511_8),
];

/// 16-point Gauss-Legendre rule (degree 31)
pub const GL16: [(f64, f64); 16] = [
    (-0.989_400_934_991_649_9, 0.027_152_459_411_754_1),
    (-0.944_575_023_073_232_6, 0.062_253_523_938_647_9),
    (-0.865_631_202_387_831_8, 0.095_158_511_682_492_8),
    (-0.755_404_408_355_003_0, 0.124_628_971_255_534_0),
    (-0.617_876_244_402_643_8, 0.149_595_988_816_576_7),
    (-0.458_016_777_657_227_4, 0.169_156_519_395_002_5),
    (-0.281_603_550_779_258_9, 0.182_603_415_044_923_6),
    (-0.095_012_509_837_637_4, 0.189_450_610_455_068_5),
    (0.095_012_509_837_637_4, 0.189_450_610_455_068_5),
    (0.281_603_550_779_258_9, 0.182_603_415_044_923_6),
    (0.458_016_777_657_227_4, 0.169_156_519_395_002_5),
    (0.617_876_244_402_643_8, 0.149_595_988_816_576_7),
    (0.755_404_408_355_003_0, 0.124_628_971_255_534_0),
    (0.865_631_202_387_831_8, 0.095_158_511_682_492_8),
    (0.944_575_023_073_232_6, 0.062_253_523_938_647_9),
    (0.989_400_934_991_649_9, 0.027_152_459_411_754_1),
];

/// Gauss-Legendre rule on [-1, 1] for the requested order (rounded up)
pub fn gauss_legendre(order: usize) -> &'static [(f64, f64)] {
    match order {
        0..=2 => &GL2,
        3..=4 => &GL4,
        5..=8 => &GL8,
        9..=12 => &GL12,
        _ => &GL16,
    }
}

/// 1-point centroid rule (degree 1)
pub const TRI1: [(f64, f64, f64); 1] = [(1.0 / 3.0, 1.0 / 3.0, 0.5)];

/// 3-point interior rule (degree 2)
pub const TRI3: [(f64, f64, f64); 3] = [
    (1.0 / 6.0, 1.0 / 6.0, 1.0 / 6.0),
    (2.0 / 3.0, 1.0 / 6.0, 1.0 / 6.0),
    (1.0 / 6.0, 2.0 / 3.0, 1.0 / 6.0),
];

/// 4-point rule (degree 3); the centroid weight is negative
pub const TRI4: [(f64, f64, f64); 4] = [
    (1.0 / 3.0, 1.0 / 3.0, -0.281_25),
    (0.6, 0.2, 0.260_416_666_666_666_7),
    (0.2, 0.6, 0.260_416_666_666_666_7),
    (0.2, 0.2, 0.260_416_666_666_666_7),
];

/// 7-point rule (degree 5)
pub const TRI7: [(f64, f64, f64); 7] = [
    (1.0 / 3.0, 1.0 / 3.0, 0.112_5),
    (
        0.470_142_064_105_115_1,
        0.470_142_064_105_115_1,
        0.066_197_076_394_253_0,
    ),
    (
        0.059_715_871_789_769_8,
        0.470_142_064_105_115_1,
        0.066_197_076_394_253_0,
    ),
    (
        0.470_142_064_105_115_1,
        0.059_715_871_789_769_8,
        0.066_197_076_394_253_0,
    ),
    (
        0.101_286_507_323_456_3,
        0.101_286_507_323_456_3,
        0.062_969_590_272_413_6,
    ),
    (
        0.797_426_985_353_087_4,
        0.101_286_507_323_456_3,
        0.062_969_590_272_413_6,
    ),
    (
        0.101_286_507_323_456_3,
        0.797_426_985_353_087_4,
        0.062_969_590_272_413_6,
    ),
];

/// 13-point rule (degree 7); the centroid weight is negative
pub const TRI13: [(f64, f64, f64); 13] = [
    (1.0 / 3.0, 1.0 / 3.0, -0.074_785_022_233_835_0),
    (
        0.260_345_966_079_039_8,
        0.260_345_966_079_039_8,
        0.087_807_628_716_602_0,
    ),
    (
        0.479_308_067_841_920_4,
        0.260_345_966_079_039_8,
        0.087_807_628_716_602_0,
    ),
    (
        0.260_345_966_079_039_8,
        0.479_308_067_841_920_4,
        0.087_807_628_716_602_0,
    ),
    (
        0.065_130_102_902_215_8,
        0.065_130_102_902_215_8,
        0.026_673_617_804_419_5,
    ),
    (
        0.869_739_794_195_568_4,
        0.065_130_102_902_215_8,
        0.026_673_617_804_419_5,
    ),
    (
        0.065_130_102_902_215_8,
        0.869_739_794_195_568_4,
        0.026_673_617_804_419_5,
    ),
    (
        0.312_865_496_004_873_9,
        0.048_690_315_425_316_0,
        0.038_556_880_445_128_5,
    ),
    (
        0.048_690_315_425_316_0,
        0.312_865_496_004_873_9,
        0.038_556_880_445_128_5,
    ),
    (
        0.638_444_188_569_810_1,
        0.312_865_496_004_873_9,
        0.038_556_880_445_128_5,
    ),
    (
        0.312_865_496_004_873_9,
        0.638_444_188_569_810_1,
        0.038_556_880_445_128_5,
    ),
    (
        0.638_444_188_569_810_1,
        0.048_690_315_425_316_0,
        0.038_556_880_445_128_5,
    ),
    (
        0.048_690_315_425_316_0,
        0.638_444_188_569_810_1,
        0.038_556_880_445_128_5,
    ),
];

/// Triangle rule on the reference triangle for the requested degree
/// (rounded up)
pub fn triangle_rule(degree: usize) -> &'static [(f64, f64, f64)] {
    match degree {
        0..=1 => &TRI1,
        2 => &TRI3,
        3 => &TRI4,
        4..=5 => &TRI7,
        _ => &TRI13,
    }
}
